//! Configuration loading and typed config structures for the lift controller.
//!
//! The canonical configuration lives in `lift-config.yaml` in the working
//! directory. Every field is optional; omitted fields take the values of
//! the reference problem (4 cars, 25 floors, 8 passengers per car).

use std::path::Path;

use lift_types::Floor;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its allowed range.
    #[error("invalid config: {message}")]
    Invalid {
        /// Which value was rejected and why.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level controller configuration.
///
/// Mirrors the structure of `lift-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Which scoring problem to play and the fleet's mechanical limits.
    #[serde(default)]
    pub problem: ProblemConfig,

    /// Bounds on the driving loop.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the problem:
    /// - `LIFT_PROBLEM_ID` overrides `problem.id`
    /// - `LIFT_ELEVATOR_COUNT` overrides `problem.elevator_count`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.problem.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the dispatcher cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let problem = &self.problem;
        if problem.elevator_count == 0 {
            return Err(ConfigError::Invalid {
                message: "problem.elevator_count must be at least 1".to_owned(),
            });
        }
        if problem.max_floor < 2 {
            return Err(ConfigError::Invalid {
                message: format!(
                    "problem.max_floor must be at least 2, got {}",
                    problem.max_floor
                ),
            });
        }
        if problem.max_carrying == 0 {
            return Err(ConfigError::Invalid {
                message: "problem.max_carrying must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// The scoring problem and the fleet's mechanical limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProblemConfig {
    /// Scenario identifier passed to the server on session start.
    #[serde(default = "default_problem_id")]
    pub id: u32,

    /// User key passed to the server on session start.
    #[serde(default = "default_user")]
    pub user: String,

    /// Number of elevator cars.
    #[serde(default = "default_elevator_count")]
    pub elevator_count: usize,

    /// Highest floor. The lowest floor is always 1.
    #[serde(default = "default_max_floor")]
    pub max_floor: Floor,

    /// Maximum simultaneous passengers per car.
    #[serde(default = "default_max_carrying")]
    pub max_carrying: usize,
}

impl ProblemConfig {
    /// Override problem values from environment variables, if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but is not a
    /// valid number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("LIFT_PROBLEM_ID") {
            self.id = val.parse().map_err(|e| ConfigError::Invalid {
                message: format!("invalid LIFT_PROBLEM_ID: {e}"),
            })?;
        }
        if let Ok(val) = std::env::var("LIFT_ELEVATOR_COUNT") {
            self.elevator_count = val.parse().map_err(|e| ConfigError::Invalid {
                message: format!("invalid LIFT_ELEVATOR_COUNT: {e}"),
            })?;
        }
        Ok(())
    }

    /// The runtime limits the dispatch core needs.
    pub const fn limits(&self) -> DispatchLimits {
        DispatchLimits {
            elevator_count: self.elevator_count,
            max_floor: self.max_floor,
            max_carrying: self.max_carrying,
        }
    }
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            id: default_problem_id(),
            user: default_user(),
            elevator_count: default_elevator_count(),
            max_floor: default_max_floor(),
            max_carrying: default_max_carrying(),
        }
    }
}

/// The only parameters the dispatch core reads at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchLimits {
    /// Number of cars in the fleet.
    pub elevator_count: usize,
    /// Highest floor (upper sweep boundary).
    pub max_floor: Floor,
    /// Car capacity.
    pub max_carrying: usize,
}

/// Bounds on the driving loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks before the controller gives up (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (required by serde's `default = "..."` attribute)
// ---------------------------------------------------------------------------

const fn default_problem_id() -> u32 {
    2
}

fn default_user() -> String {
    "tester".to_owned()
}

const fn default_elevator_count() -> usize {
    4
}

const fn default_max_floor() -> Floor {
    25
}

const fn default_max_carrying() -> usize {
    8
}

fn default_log_level() -> String {
    "info".to_owned()
}
