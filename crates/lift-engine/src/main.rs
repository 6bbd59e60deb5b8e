//! Lift dispatch controller binary.
//!
//! Wires the scoring server client to the dispatcher and runs the tick loop
//! until the server ends the simulation.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `lift-config.yaml` (or `LIFT_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the HTTP client from the environment
//! 4. Start a session on the scoring server
//! 5. Run the simulation loop
//! 6. Log the result

mod error;

use std::path::{Path, PathBuf};

use lift_client::{LiftClientConfig, SimulationClient};
use lift_core::config::SimulationConfig;
use lift_core::dispatch::Dispatcher;
use lift_core::runner;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Config file read when `LIFT_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "lift-config.yaml";

/// Application entry point for the controller.
///
/// # Errors
///
/// Returns an error if configuration, session start, or the tick loop fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so failures surface
    //    through the returned error.
    let config_path = config_path();
    let (config, from_file) = load_config(&config_path)?;

    // 2. Initialize structured logging. RUST_LOG wins over the config file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("lift-engine starting");
    if from_file {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        problem = config.problem.id,
        user = config.problem.user,
        elevator_count = config.problem.elevator_count,
        max_floor = config.problem.max_floor,
        max_carrying = config.problem.max_carrying,
        max_ticks = config.simulation.max_ticks,
        "Problem configured"
    );

    // 3. Build the HTTP client.
    let client_config = LiftClientConfig::from_env().map_err(EngineError::from)?;
    info!(
        api_url = client_config.api_url,
        timeout = ?client_config.request_timeout,
        "Scoring server client configured"
    );
    let mut client = SimulationClient::new(&client_config).map_err(EngineError::from)?;

    // 4. Start the session.
    let session = client
        .start(
            &config.problem.user,
            config.problem.id,
            config.problem.elevator_count,
        )
        .await
        .map_err(EngineError::from)?;

    if session.elevators.len() != config.problem.elevator_count {
        warn!(
            configured = config.problem.elevator_count,
            reported = session.elevators.len(),
            "Server reports a different fleet size than configured"
        );
    }
    if session.is_end {
        info!(timestamp = session.timestamp, "Session ended before the first tick");
        return Ok(());
    }

    // 5. Run the simulation loop.
    let mut dispatcher = Dispatcher::new(config.problem.limits());
    let result = runner::run_simulation(&mut dispatcher, &mut client, &config.simulation)
        .await
        .map_err(EngineError::from)?;

    // 6. Log the result.
    runner::log_simulation_end(&result);

    Ok(())
}

/// Resolve the config file path from `LIFT_CONFIG`, falling back to
/// `lift-config.yaml` in the working directory.
fn config_path() -> PathBuf {
    std::env::var_os("LIFT_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load configuration from `path`, or defaults when the file does not exist.
///
/// The returned flag tells whether the file was read. Environment overrides
/// apply either way.
fn load_config(path: &Path) -> Result<(SimulationConfig, bool), EngineError> {
    if path.exists() {
        return Ok((SimulationConfig::from_file(path)?, true));
    }
    let mut config = SimulationConfig::default();
    config.problem.apply_env_overrides()?;
    config.validate()?;
    Ok((config, false))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let (config, from_file) =
            load_config(Path::new("does-not-exist/lift-config.yaml")).unwrap();

        assert!(!from_file);
        assert_eq!(config.problem.max_floor, 25);
        assert_eq!(config.problem.max_carrying, 8);
    }

    #[test]
    fn shipped_config_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../lift-config.yaml");

        let (config, from_file) = load_config(&path).unwrap();

        assert!(from_file);
        assert_eq!(config.problem.user, "tester");
        assert_eq!(config.simulation.max_ticks, 0);
        assert_eq!(config.logging.level, "info");
    }
}
