//! User Revision
//!
//! One asynchronous interaction between a random pair of users under one of
//! the non-ageing modes. Same-group pairs always update each other first;
//! the mode policy then acts on the pair.

use crate::components::{Mode, Population};
use crate::config::ModelConfig;
use crate::error::{ConfigError, SimError};
use crate::rng::SimRng;
use crate::systems::update::{
    refresh_tolerance, reject_opinion, update_opinion, update_opinion_disc,
};

/// Interaction rule of the non-ageing modes
#[derive(Debug, Clone, PartialEq)]
pub struct RevisionRule {
    mode: Mode,
    extremism: bool,
    homophily_parameter: f64,
    tolerance: f64,
}

impl RevisionRule {
    /// Returns `None` for the ageing mode, which has its own rule.
    pub fn new(model: &ModelConfig) -> Option<Self> {
        if model.mode.is_ageing() {
            return None;
        }
        Some(Self {
            mode: model.mode,
            extremism: model.extremism,
            homophily_parameter: model.homophily_parameter,
            tolerance: model.tolerance,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Chooses an interaction pair and applies the mode's update functions.
    pub fn user_revision(
        &self,
        population: &mut Population,
        rng: &mut SimRng,
    ) -> Result<(), SimError> {
        let (v, mut nb) = population
            .random_pair(rng)
            .ok_or_else(|| population_too_small(population.len()))?;
        let op_v = population[v].opinion;

        if population[v].same_group(&population[nb]) {
            mutual_update(population, v, nb, op_v);
        }

        match self.mode {
            Mode::ConflictDir => conflict_dir(population, v, nb, op_v),
            Mode::ConflictUndir => conflict_undir(population, v, nb, op_v),
            Mode::Isolated1 => isolated_1(population, v, nb, op_v),
            Mode::Isolated2 => isolated_2(population, v, nb, op_v),
            Mode::ReducedIntProb => {
                if rng.uniform_prob() <= self.homophily_parameter
                    && !population[v].same_group(&population[nb])
                {
                    nb = in_group_partner(population, v, rng)?;
                }
                mutual_update(population, v, nb, op_v);
            }
            Mode::ReducedS => {
                let nb_op = population[nb].opinion;
                update_opinion_disc(&mut population[v], nb_op);
                update_opinion_disc(&mut population[nb], op_v);
            }
            // excluded by the constructor
            Mode::Ageing => {}
        }

        if self.extremism {
            refresh_tolerance(&mut population[v], self.tolerance);
            refresh_tolerance(&mut population[nb], self.tolerance);
        }
        Ok(())
    }
}

pub(crate) fn population_too_small(len: usize) -> SimError {
    ConfigError::invalid(
        "num_vertices",
        format!("at least 2 users are needed to form a pair, got {}", len),
    )
    .into()
}

/// Both users move toward each other with the same-group susceptibility.
pub(crate) fn mutual_update(population: &mut Population, v: usize, nb: usize, op_v: f64) {
    let nb_op = population[nb].opinion;
    update_opinion(&mut population[v], nb_op);
    update_opinion(&mut population[nb], op_v);
}

/// Lower group numbers reject higher groups' opinions; higher group numbers
/// take lower groups' opinions at reduced susceptibility.
fn conflict_dir(population: &mut Population, v: usize, nb: usize, op_v: f64) {
    let nb_op = population[nb].opinion;
    if population[v].group < population[nb].group {
        reject_opinion(&mut population[v], nb_op);
        update_opinion_disc(&mut population[nb], op_v);
    } else {
        update_opinion_disc(&mut population[v], nb_op);
        reject_opinion(&mut population[nb], op_v);
    }
}

/// Each user rejects if it discriminates, otherwise updates at reduced
/// susceptibility.
fn conflict_undir(population: &mut Population, v: usize, nb: usize, op_v: f64) {
    let nb_op = population[nb].opinion;
    if population[v].discriminates {
        reject_opinion(&mut population[v], nb_op);
    } else {
        update_opinion_disc(&mut population[v], nb_op);
    }
    if population[nb].discriminates {
        reject_opinion(&mut population[nb], op_v);
    } else {
        update_opinion_disc(&mut population[nb], op_v);
    }
}

/// Discriminators are frozen; non-discriminators update from anyone.
fn isolated_1(population: &mut Population, v: usize, nb: usize, op_v: f64) {
    let nb_op = population[nb].opinion;
    if !population[v].discriminates {
        update_opinion(&mut population[v], nb_op);
    }
    if !population[nb].discriminates {
        update_opinion(&mut population[nb], op_v);
    }
}

/// A single discriminator blocks the exchange.
fn isolated_2(population: &mut Population, v: usize, nb: usize, op_v: f64) {
    if !population[v].discriminates && !population[nb].discriminates {
        mutual_update(population, v, nb, op_v);
    }
}

fn in_group_partner(
    population: &Population,
    v: usize,
    rng: &mut SimRng,
) -> Result<usize, SimError> {
    let group = population[v].group;
    population
        .random_user_where(rng, v, |u| u.group == group)
        .ok_or(SimError::NoInGroupPartner { user: v, group })
}
