//! Error Types
//!
//! Configuration errors are raised before the first step runs; simulation
//! errors cover sampling loops that cannot be satisfied and output failures.

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Error serializing config back to TOML
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Mode {0} unknown!")]
    UnknownMode(String),
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while setting up or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// A bounded rejection-sampling loop found no acceptable draw
    #[error("sampling {what} failed after {attempts} attempts")]
    SamplingExhausted { what: &'static str, attempts: usize },
    /// Ageing: no user aged 20 to 40 is available as a parent
    #[error("no user aged 20 to 40 can act as parent of user {user}; population too small for the age bands")]
    NoEligibleParent { user: usize },
    /// Reduced interaction probability: the user's group has no other member
    #[error("user {user} has no other member in group {group}")]
    NoInGroupPartner { user: usize, group: f64 },
    #[error("invalid distribution parameters: {0}")]
    Distribution(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
