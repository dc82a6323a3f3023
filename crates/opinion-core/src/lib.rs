//! Opinion Dynamics with Discrimination
//!
//! Bounded-confidence opinion dynamics on a population of users split into
//! social groups. Seven interaction modes decide whether a pair of users
//! updates toward, rejects, or ignores each other's opinion; the ageing mode
//! turns the group into an age and reinitialises old users as children.

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod rng;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::Config;
pub use error::{ConfigError, SimError};
pub use rng::SimRng;
pub use simulation::Simulation;
pub use systems::Dynamics;
