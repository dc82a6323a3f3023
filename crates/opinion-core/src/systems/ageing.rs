//! Ageing
//!
//! In ageing mode a user's group is its age. Peers of similar age update
//! toward each other; across generations the younger user rejects the older
//! one's opinion while the older user listens at reduced susceptibility.
//! Users older than the life expectancy are reborn as children.

use crate::components::Population;
use crate::config::ModelConfig;
use crate::error::SimError;
use crate::rng::SimRng;
use crate::setup::CHILD_AGE;
use crate::systems::revision::{mutual_update, population_too_small};
use crate::systems::update::{refresh_tolerance, reject_opinion, update_opinion_disc};

/// Lower bound of the parent age band
pub const PARENT_MIN_AGE: f64 = 20.0;
/// Upper bound of the parent age band
pub const PARENT_MAX_AGE: f64 = 40.0;

/// Interaction and lifecycle rule of the ageing mode
#[derive(Debug, Clone, PartialEq)]
pub struct AgeingRule {
    pub extremism: bool,
    pub life_expectancy: f64,
    pub peer_radius: f64,
    pub time_scale: f64,
    pub tolerance: f64,
}

impl AgeingRule {
    pub fn new(model: &ModelConfig) -> Self {
        Self {
            extremism: model.extremism,
            life_expectancy: model.ageing.life_expectancy,
            peer_radius: model.ageing.peer_radius,
            time_scale: model.ageing.time_scale,
            tolerance: model.tolerance,
        }
    }

    /// One interaction between a random pair followed by their ageing.
    pub fn user_revision(
        &self,
        population: &mut Population,
        rng: &mut SimRng,
    ) -> Result<(), SimError> {
        let (v, nb) = population
            .random_pair(rng)
            .ok_or_else(|| population_too_small(population.len()))?;
        let op_v = population[v].opinion;
        let age_gap = (population[v].group - population[nb].group).abs();

        if age_gap < self.peer_radius {
            mutual_update(population, v, nb, op_v);
        } else {
            let nb_op = population[nb].opinion;
            if population[v].group < population[nb].group {
                reject_opinion(&mut population[v], nb_op);
                update_opinion_disc(&mut population[nb], op_v);
            } else {
                update_opinion_disc(&mut population[v], nb_op);
                reject_opinion(&mut population[nb], op_v);
            }
        }

        if self.extremism {
            refresh_tolerance(&mut population[v], self.tolerance);
            refresh_tolerance(&mut population[nb], self.tolerance);
        }

        self.grow_older(population, v, rng)?;
        self.grow_older(population, nb, rng)
    }

    /// Advances the user's age, or reinitialises it as a child once it has
    /// outlived the life expectancy.
    pub fn grow_older(
        &self,
        population: &mut Population,
        user: usize,
        rng: &mut SimRng,
    ) -> Result<(), SimError> {
        if population[user].group > self.life_expectancy {
            self.reinitialise_as_child(population, user, rng)
        } else {
            population[user].group += self.time_scale;
            Ok(())
        }
    }

    /// Resets the user to the child age with the opinion of a random parent
    /// aged 20 to 40.
    pub fn reinitialise_as_child(
        &self,
        population: &mut Population,
        user: usize,
        rng: &mut SimRng,
    ) -> Result<(), SimError> {
        let parent = population
            .random_user_where(rng, user, |u| {
                (PARENT_MIN_AGE..=PARENT_MAX_AGE).contains(&u.group)
            })
            .ok_or(SimError::NoEligibleParent { user })?;

        let opinion = population[parent].opinion;
        let child = &mut population[user];
        child.group = CHILD_AGE;
        child.opinion = opinion;
        if self.extremism {
            refresh_tolerance(child, self.tolerance);
        }
        tracing::trace!(user, parent, "reinitialised user as child");
        Ok(())
    }
}
