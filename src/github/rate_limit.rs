//! Rate-limit throttling based on GitHub's `X-RateLimit-*` response headers.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::header::HeaderMap;

const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// When and how long to back off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Back off once fewer than this many requests remain.
    pub threshold: u64,
    /// Added on top of the advertised reset time.
    pub grace: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            threshold: 10,
            grace: Duration::from_secs(5),
        }
    }
}

/// Rate-limit state reported by a single response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub remaining: u64,
    /// Unix timestamp (seconds) at which the quota resets.
    pub reset: Option<u64>,
}

impl RateLimit {
    /// Read the rate-limit headers. `None` when `X-RateLimit-Remaining` is absent or garbled.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = header_u64(headers, REMAINING_HEADER)?;
        Some(Self {
            remaining,
            reset: header_u64(headers, RESET_HEADER),
        })
    }

    /// How long to sleep before the next request, given the current Unix time.
    pub fn wait_time(&self, policy: &RateLimitPolicy, now: u64) -> Option<Duration> {
        if self.remaining >= policy.threshold {
            return None;
        }
        let reset = self.reset?;
        let wait = reset
            .saturating_add(policy.grace.as_secs())
            .checked_sub(now)?;
        (wait > 0).then(|| Duration::from_secs(wait))
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Inspect a response's headers and sleep if the quota is nearly exhausted.
///
/// Returns the time slept, if any.
pub fn throttle(headers: &HeaderMap, policy: &RateLimitPolicy) -> Option<Duration> {
    let limit = RateLimit::from_headers(headers)?;
    tracing::info!("API Remaining Requests: {}", limit.remaining);

    let wait = limit.wait_time(policy, unix_now())?;
    tracing::warn!(
        "Rate limit is low, waiting {} seconds...",
        wait.as_secs()
    );
    std::thread::sleep(wait);
    Some(wait)
}
