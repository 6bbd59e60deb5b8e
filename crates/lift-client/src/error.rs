//! Error types for the scoring server client.

/// Errors that can occur while talking to the scoring server.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connect failure, timeout).
    #[error("request to {endpoint} failed: {source}")]
    Request {
        /// The endpoint that was called.
        endpoint: &'static str,
        /// The underlying HTTP error.
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        /// The endpoint that was called.
        endpoint: &'static str,
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The response body, for diagnostics.
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("{endpoint} response could not be decoded: {source}")]
    Decode {
        /// The endpoint that was called.
        endpoint: &'static str,
        /// The underlying decode error.
        source: reqwest::Error,
    },

    /// A session call was made before `start` obtained a token.
    #[error("no session token, start a session first")]
    NotStarted,

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),
}
