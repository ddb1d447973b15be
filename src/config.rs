//! API client configuration.
//!
//! Browser builds have no process environment, so overrides are read at
//! compile time via `option_env!`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address every request path is appended to, without a trailing `/`.
    pub api_base_url: String,
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Build config from compile-time environment variables.
    ///
    /// Optional:
    /// - `BOOK_TRACKER_API_URL`: default `http://localhost:8081/api`
    /// - `BOOK_TRACKER_API_TIMEOUT_MS`: default 10000
    pub fn from_env() -> Self {
        Self::from_values(option_env!("BOOK_TRACKER_API_URL"), option_env!("BOOK_TRACKER_API_TIMEOUT_MS"))
    }

    pub fn from_values(base_url: Option<&str>, timeout_ms: Option<&str>) -> Self {
        Self { api_base_url: parse_base_url(base_url), request_timeout_ms: parse_timeout_ms(timeout_ms) }
    }
}

fn parse_base_url(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(url) if !url.is_empty() => url.trim_end_matches('/').to_owned(),
        _ => DEFAULT_API_BASE_URL.to_owned(),
    }
}

fn parse_timeout_ms(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
}
