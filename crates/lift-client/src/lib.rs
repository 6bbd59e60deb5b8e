//! HTTP transport for the lift dispatcher.
//!
//! Talks to the scoring server's three endpoints (`/start`, `/oncalls`,
//! `/action`) with `reqwest` and exposes the session as a
//! [`Transport`](lift_core::runner::Transport).

pub mod client;
pub mod config;
pub mod error;

pub use client::SimulationClient;
pub use config::LiftClientConfig;
pub use error::ClientError;
