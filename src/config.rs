//! Runtime configuration sourced from the environment and an optional `.env` file.

use std::time::Duration;

use crate::error::{Result, SweepError};
use crate::github::RateLimitPolicy;

/// Default GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Environment variable holding the personal access token.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Environment variable overriding the API endpoint.
pub const API_URL_VAR: &str = "GITHUB_API_URL";

/// Settings needed to talk to the GitHub API.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub api_url: String,
    pub rate_limit: RateLimitPolicy,
}

impl Config {
    /// Create a config for the public GitHub API with the default rate-limit policy.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.into(),
            rate_limit: RateLimitPolicy::default(),
        }
    }

    /// Load `.env` from the working directory (if present), then read the process environment.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(SweepError::InvalidConfig(format!(
                    "failed to load .env file: {}",
                    e
                )));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(SweepError::MissingToken)?;

        let mut config = Self::new(token);
        if let Some(url) = lookup(API_URL_VAR).filter(|u| !u.trim().is_empty()) {
            config = config.with_api_url(url);
        }
        Ok(config)
    }

    /// Point at a different API endpoint (e.g. GitHub Enterprise).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into().trim().to_string();
        while url.ends_with('/') {
            url.pop();
        }
        self.api_url = url;
        self
    }

    /// Only throttle once fewer than `threshold` requests remain.
    pub fn with_rate_limit_threshold(mut self, threshold: u64) -> Self {
        self.rate_limit.threshold = threshold;
        self
    }

    /// Extra time to wait past the advertised reset.
    pub fn with_rate_limit_grace(mut self, grace: Duration) -> Self {
        self.rate_limit.grace = grace;
        self
    }
}
