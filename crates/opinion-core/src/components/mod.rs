//! Simulation state: users, the population that indexes them, and the
//! interaction mode selected for a run.

pub mod mode;
pub mod population;
pub mod user;

pub use mode::*;
pub use population::*;
pub use user::*;
