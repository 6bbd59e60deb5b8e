//! Error types for the controller binary.

use lift_client::ClientError;

/// Top-level error for the controller binary.
///
/// Each variant wraps one subsystem's error so `main` can propagate
/// everything with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: lift_core::config::ConfigError,
    },

    /// Building the client or starting the session failed.
    #[error("client error: {source}")]
    Client {
        /// The underlying client error.
        #[from]
        source: ClientError,
    },

    /// The tick loop stopped on a transport failure.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: lift_core::runner::RunnerError<ClientError>,
    },
}
