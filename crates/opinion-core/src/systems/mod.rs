//! Interaction Systems
//!
//! Update primitives, the per-mode revision rule, and the ageing rule. The
//! rule for a run is selected once from the configured mode.

pub mod ageing;
pub mod revision;
pub mod update;

pub use ageing::AgeingRule;
pub use revision::RevisionRule;
pub use update::{
    refresh_tolerance, reject_opinion, rejection_func, tolerance_func, update_opinion,
    update_opinion_disc,
};

use crate::components::{Mode, Population};
use crate::config::ModelConfig;
use crate::error::SimError;
use crate::rng::SimRng;

/// Step rule of a run
#[derive(Debug, Clone, PartialEq)]
pub enum Dynamics {
    Revision(RevisionRule),
    Ageing(AgeingRule),
}

impl Dynamics {
    pub fn from_config(model: &ModelConfig) -> Self {
        match RevisionRule::new(model) {
            Some(rule) => Dynamics::Revision(rule),
            None => Dynamics::Ageing(AgeingRule::new(model)),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Dynamics::Revision(rule) => rule.mode(),
            Dynamics::Ageing(_) => Mode::Ageing,
        }
    }

    /// Performs one interaction on the population.
    pub fn step(&self, population: &mut Population, rng: &mut SimRng) -> Result<(), SimError> {
        match self {
            Dynamics::Revision(rule) => rule.user_revision(population, rng),
            Dynamics::Ageing(rule) => rule.user_revision(population, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_selection() {
        for mode in Mode::ALL {
            let model = ModelConfig {
                mode,
                ..ModelConfig::default()
            };
            let dynamics = Dynamics::from_config(&model);
            assert_eq!(dynamics.mode(), mode);
            assert_eq!(matches!(dynamics, Dynamics::Ageing(_)), mode.is_ageing());
        }
    }
}
