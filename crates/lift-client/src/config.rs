//! Client configuration.
//!
//! Everything the client needs comes from environment variables: where the
//! scoring server lives and how long a single request may take.

use std::time::Duration;

use crate::error::ClientError;

/// Default scoring server address.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 7000;

/// Connection settings for the scoring server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiftClientConfig {
    /// Base URL of the scoring server, without a trailing slash.
    pub api_url: String,
    /// Upper bound on a single HTTP request.
    pub request_timeout: Duration,
}

impl Default for LiftClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl LiftClientConfig {
    /// Point the client at `api_url` with the default timeout.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `LIFT_API_URL` -- scoring server base URL (default `http://localhost:8000`)
    /// - `LIFT_REQUEST_TIMEOUT_MS` -- per-request timeout in milliseconds (default 7000)
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if a variable is set to an unusable
    /// value.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let api_url = lookup("LIFT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let api_url = api_url.trim().trim_end_matches('/').to_owned();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "invalid LIFT_API_URL: {api_url:?} is not an http(s) URL"
            )));
        }

        let timeout_ms: u64 = match lookup("LIFT_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                ClientError::Config(format!("invalid LIFT_REQUEST_TIMEOUT_MS: {e}"))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };
        if timeout_ms == 0 {
            return Err(ClientError::Config(
                "invalid LIFT_REQUEST_TIMEOUT_MS: must be greater than 0".to_owned(),
            ));
        }

        Ok(Self {
            api_url,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
