//! Configuration System
//!
//! Loads run parameters from a TOML file. Every field has a default, so a
//! file only needs to name what it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::components::Mode;
use crate::error::ConfigError;
use crate::setup::GraphModel;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "opdisc.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub network: NetworkConfig,
    pub model: ModelConfig,
}

/// Time stepping and output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    /// Number of interactions to perform
    pub num_steps: u64,
    /// Interval between time-series writes
    pub write_every: u64,
    /// First time at which frames are written
    pub write_start: u64,
    pub output_dir: PathBuf,
    /// Bins of the opinion histogram in the summary
    pub histogram_bins: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_steps: 100_000,
            write_every: 1_000,
            write_start: 0,
            output_dir: PathBuf::from("output"),
            histogram_bins: 100,
        }
    }
}

/// User network generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub num_vertices: usize,
    pub model: GraphModel,
    pub mean_degree: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            num_vertices: 1_000,
            model: GraphModel::ErdosRenyi,
            mean_degree: 4,
        }
    }
}

/// Interaction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub mode: Mode,
    /// Probability of discriminating under `conflict_undir`
    pub discriminators: f64,
    /// Opinion-dependent tolerance
    pub extremism: bool,
    /// Discrimination probability (isolated modes), in-group resampling
    /// probability (`reduced_int_prob`), and input to `susceptibility_2`
    pub homophily_parameter: f64,
    pub number_of_groups: u32,
    pub susceptibility: f64,
    pub tolerance: f64,
    pub ageing: AgeingConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            discriminators: 0.1,
            extremism: false,
            homophily_parameter: 0.5,
            number_of_groups: 3,
            susceptibility: 0.2,
            tolerance: 0.3,
            ageing: AgeingConfig::default(),
        }
    }
}

impl ModelConfig {
    /// Reduced susceptibility for inter-group interactions.
    pub fn susceptibility_2(&self) -> f64 {
        self.susceptibility * (1.0 - self.homophily_parameter)
    }
}

/// Ageing mode parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeingConfig {
    /// Age above which users are reinitialised as children
    pub life_expectancy: f64,
    /// Age gap below which users interact as peers
    pub peer_radius: f64,
    /// Age increment per interaction
    pub time_scale: f64,
    /// Lower edges of the age bands used for group statistics
    pub age_groups: Vec<f64>,
}

impl Default for AgeingConfig {
    fn default() -> Self {
        Self {
            life_expectancy: 80.0,
            peer_radius: 10.0,
            time_scale: 1.0,
            age_groups: vec![10.0, 20.0, 40.0, 60.0, 80.0],
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    /// Checks parameter ranges and cross-parameter consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        let model = &self.model;
        let n = self.network.num_vertices;

        if n < 2 {
            return Err(ConfigError::invalid(
                "num_vertices",
                format!("at least 2 users are needed to form a pair, got {}", n),
            ));
        }
        if sim.write_every == 0 {
            return Err(ConfigError::invalid("write_every", "must be at least 1"));
        }
        if sim.histogram_bins == 0 {
            return Err(ConfigError::invalid("histogram_bins", "must be at least 1"));
        }

        check_probability("discriminators", model.discriminators)?;
        check_probability("homophily_parameter", model.homophily_parameter)?;
        check_probability("susceptibility", model.susceptibility)?;
        if !(model.tolerance >= 0.0) {
            return Err(ConfigError::invalid(
                "tolerance",
                format!("must be non-negative, got {}", model.tolerance),
            ));
        }

        if model.mode.is_ageing() {
            let ageing = &model.ageing;
            if !(ageing.life_expectancy >= 10.0) {
                return Err(ConfigError::invalid(
                    "life_expectancy",
                    format!("must be at least the child age 10, got {}", ageing.life_expectancy),
                ));
            }
            if !(ageing.peer_radius >= 0.0) {
                return Err(ConfigError::invalid("peer_radius", "must be non-negative"));
            }
            if !(ageing.time_scale > 0.0) {
                return Err(ConfigError::invalid("time_scale", "must be positive"));
            }
        } else {
            let groups = model.number_of_groups as usize;
            if groups == 0 {
                return Err(ConfigError::invalid("number_of_groups", "must be at least 1"));
            }
            if !model.mode.draws_random_groups() && n < groups {
                return Err(ConfigError::invalid(
                    "number_of_groups",
                    format!("{} groups cannot be partitioned among {} users", groups, n),
                ));
            }
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            name,
            format!("must lie in [0, 1], got {}", value),
        ))
    }
}
