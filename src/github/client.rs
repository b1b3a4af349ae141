//! GitHub API client.

use reqwest::Method;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

use crate::config::Config;
use crate::error::{Result, SweepError};
use crate::github::rate_limit::{RateLimitPolicy, throttle};

/// Client for interacting with the GitHub API.
#[derive(Clone)]
pub struct GitHubClient {
    pub(crate) base_url: String,
    pub(crate) rate_limit: RateLimitPolicy,
    pub(crate) client: Client,
    headers: HeaderMap,
}

impl GitHubClient {
    /// Create a new GitHub client for the public API with the given token.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::from_config(&Config::new(token))
    }

    /// Create a client from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            base_url: config.api_url.clone(),
            rate_limit: config.rate_limit,
            client: Client::builder().build()?,
            headers: default_headers(&config.token)?,
        })
    }

    /// Create a client using `GITHUB_TOKEN` (and `.env`, if present).
    pub fn from_env() -> Result<Self> {
        Self::from_config(&Config::from_env()?)
    }

    /// Send a request and run the response through the rate-limit throttle.
    ///
    /// The status is not interpreted here; callers decide what counts as success.
    pub(crate) fn send(&self, method: Method, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(method = method.as_str(), %url, "GitHub request");

        let response = self
            .client
            .request(method, &url)
            .headers(self.headers.clone())
            .send()?;

        tracing::debug!(status = %response.status(), %url, "GitHub response");
        throttle(response.headers(), &self.rate_limit);
        Ok(response)
    }

    /// Make a GET request and decode a JSON body from a successful response.
    pub(crate) fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = self.send(Method::GET, endpoint)?;

        if !response.status().is_success() {
            return Err(api_error(response));
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Turn a non-success response into an error carrying its status and body.
pub(crate) fn api_error(response: Response) -> SweepError {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    SweepError::GitHub { status, body }
}

/// Percent-encode a single path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn default_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| {
            SweepError::InvalidToken("token contains characters not allowed in HTTP headers".into())
        })?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("collab-sweep/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(
        "X-GitHub-Api-Version",
        HeaderValue::from_static("2022-11-28"),
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::mock_server::MockGitHub;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[test]
    fn test_default_headers() {
        let headers = default_headers("ghp_abc").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer ghp_abc");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[ACCEPT], "application/vnd.github+json");
        assert!(
            headers[USER_AGENT]
                .to_str()
                .unwrap()
                .starts_with("collab-sweep/")
        );
        assert_eq!(headers["x-github-api-version"], "2022-11-28");
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let result = default_headers("ghp_abc\nInjected: yes");
        assert!(matches!(result, Err(SweepError::InvalidToken(_))));
    }

    #[test]
    fn test_client_uses_configured_base_url() {
        let config = Config::new("t").with_api_url("https://ghe.example.com/api/v3/");
        let client = GitHubClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_low_rate_limit_with_past_reset_does_not_block() {
        let github = MockGitHub::start();
        github.mount(
            Mock::given(method("GET"))
                .and(path("/user/orgs"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .insert_header("X-RateLimit-Remaining", "3")
                        .insert_header("X-RateLimit-Reset", "1")
                        .set_body_json(serde_json::json!([])),
                ),
        );

        let started = Instant::now();
        let orgs: Vec<serde_json::Value> = github.client().get("/user/orgs").unwrap();
        assert!(orgs.is_empty());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_sends_default_headers() {
        let github = MockGitHub::start();
        github.mount(
            Mock::given(method("GET"))
                .and(path("/user/orgs"))
                .and(header("authorization", "Bearer ghp_test"))
                .and(header("accept", "application/vnd.github+json"))
                .and(header("x-github-api-version", "2022-11-28"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([]))),
        );

        let orgs: Vec<serde_json::Value> = github.client().get("/user/orgs").unwrap();
        assert!(orgs.is_empty());
    }

    #[test]
    fn test_unreachable_server_is_a_transport_error() {
        let config = Config::new("t").with_api_url("http://127.0.0.1:1");
        let client = GitHubClient::from_config(&config).unwrap();
        let err = client.send(Method::GET, "/user/orgs").unwrap_err();
        assert!(matches!(err, SweepError::Http(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("my-org"), "my-org");
        assert_eq!(segment("a/b"), "a%2Fb");
        assert_eq!(segment("name with space"), "name%20with%20space");
    }
}
