//! User Initialization
//!
//! Seeds every user's group, opinion, tolerance, susceptibilities, and
//! discrimination flag from the model configuration.

use crate::components::{Mode, Population, User};
use crate::config::ModelConfig;
use crate::error::SimError;
use crate::rng::SimRng;
use crate::systems::update::tolerance_func;

/// Age given to newly initialised children in ageing mode
pub const CHILD_AGE: f64 = 10.0;

/// Deterministic near-equal split of users into groups.
///
/// With more than two groups, users landing in group 0 alternate between
/// group 0 and the top group, so the two boundary groups are half-sized.
#[derive(Debug, Clone)]
pub struct GroupPartition {
    num_groups: u32,
    q: u32,
    boundary_count: usize,
}

impl GroupPartition {
    pub fn new(num_groups: u32) -> Self {
        let num_groups = num_groups.max(1);
        let q = if num_groups <= 2 { num_groups } else { num_groups - 1 };
        Self {
            num_groups,
            q,
            boundary_count: 0,
        }
    }

    /// Group of the user at `index`. Must be called in index order.
    pub fn group_of(&mut self, index: usize) -> u32 {
        let group = (index % self.q as usize) as u32;
        if self.num_groups > 2 && group == 0 {
            let top = self.boundary_count % 2 == 1;
            self.boundary_count += 1;
            if top {
                self.q
            } else {
                0
            }
        } else {
            group
        }
    }
}

/// Initial opinion: uniform for the conflict and ageing modes, otherwise a
/// truncated Gaussian centred on the group's share of [0, 1].
pub fn initialize_opinion(
    mode: Mode,
    num_groups: u32,
    group: f64,
    rng: &mut SimRng,
) -> Result<f64, SimError> {
    if mode.uniform_opinions() || num_groups <= 1 {
        return Ok(rng.uniform_real(0.0, 1.0));
    }
    let spacing = (num_groups - 1) as f64;
    let mean = group / spacing;
    let stddev = 1.0 / (2.0 * spacing);
    rng.truncated_gaussian(mean, stddev)
}

/// Probability of the discrimination flag, if the mode uses one.
pub fn discrimination_probability(model: &ModelConfig) -> Option<f64> {
    match model.mode {
        Mode::Isolated1 | Mode::Isolated2 => Some(model.homophily_parameter),
        Mode::ConflictUndir => Some(model.discriminators),
        _ => None,
    }
}

/// Initial tolerance of a user holding `opinion`
pub fn initial_tolerance(model: &ModelConfig, opinion: f64) -> f64 {
    if model.extremism {
        tolerance_func(opinion, model.tolerance)
    } else {
        model.tolerance
    }
}

/// Initialise the properties of every user, in index order.
pub fn initialize_users(
    population: &mut Population,
    model: &ModelConfig,
    rng: &mut SimRng,
) -> Result<(), SimError> {
    let mut partition = GroupPartition::new(model.number_of_groups);
    let disc_probability = discrimination_probability(model);
    let susceptibility_2 = model.susceptibility_2();

    for index in 0..population.len() {
        let group = match model.mode {
            Mode::Ageing => {
                let max_age = model.ageing.life_expectancy.floor() as i64;
                rng.uniform_int(CHILD_AGE as i64, max_age) as f64
            }
            Mode::ConflictDir | Mode::ConflictUndir => {
                let top = model.number_of_groups.saturating_sub(1) as i64;
                rng.uniform_int(0, top) as f64
            }
            _ => partition.group_of(index) as f64,
        };

        let opinion = initialize_opinion(model.mode, model.number_of_groups, group, rng)?;
        let discriminates = match disc_probability {
            Some(p) => rng.bernoulli(p),
            None => false,
        };

        population[index] = User {
            group,
            discriminates,
            opinion,
            tolerance: initial_tolerance(model, opinion),
            susceptibility_1: model.susceptibility,
            susceptibility_2,
        };
    }

    tracing::debug!(
        "Initialized {} users for mode {}",
        population.len(),
        model.mode
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgeingConfig;

    fn model(mode: Mode, number_of_groups: u32) -> ModelConfig {
        ModelConfig {
            mode,
            number_of_groups,
            ..ModelConfig::default()
        }
    }

    fn initialized(model: &ModelConfig, n: usize, seed: u64) -> Population {
        let mut population = Population::with_size(n);
        let mut rng = SimRng::seed_from_u64(seed);
        initialize_users(&mut population, model, &mut rng).unwrap();
        population
    }

    fn group_mean(population: &Population, group: f64) -> f64 {
        let members: Vec<f64> = population
            .iter()
            .filter(|u| u.group == group)
            .map(|u| u.opinion)
            .collect();
        members.iter().sum::<f64>() / members.len() as f64
    }

    #[test]
    fn test_partition_two_groups() {
        let mut partition = GroupPartition::new(2);
        let groups: Vec<u32> = (0..6).map(|i| partition.group_of(i)).collect();
        assert_eq!(groups, vec![0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_partition_splits_boundary_groups() {
        let mut partition = GroupPartition::new(5);
        let groups: Vec<u32> = (0..8).map(|i| partition.group_of(i)).collect();
        assert_eq!(groups, vec![0, 1, 2, 3, 4, 1, 2, 3]);
    }

    #[test]
    fn test_single_group() {
        let mut partition = GroupPartition::new(1);
        assert!((0..10).all(|i| partition.group_of(i) == 0));
    }

    #[test]
    fn test_init_gauss_two_groups() {
        let n = 1000;
        let population = initialized(&model(Mode::ReducedS, 2), n, 1);

        assert_eq!(population.group_size(0.0), n / 2);
        assert_eq!(population.group_size(1.0), n / 2);
        assert!(population.iter().all(|u| (0.0..=1.0).contains(&u.opinion)));

        let mean = population.iter().map(|u| u.opinion).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.05);
        assert!(group_mean(&population, 0.0) < 0.5);
        assert!(group_mean(&population, 1.0) > 0.5);
    }

    #[test]
    fn test_init_gauss_five_groups() {
        let n = 1000;
        let population = initialized(&model(Mode::Isolated2, 5), n, 2);

        let quarter = n / 4;
        assert_eq!(population.group_size(0.0) + population.group_size(4.0), quarter);
        assert_eq!(population.group_size(0.0), quarter / 2);
        for g in 1..4 {
            assert_eq!(population.group_size(g as f64), quarter);
            assert!((group_mean(&population, g as f64) - g as f64 / 4.0).abs() < 0.05);
        }
        assert!(group_mean(&population, 0.0) < group_mean(&population, 1.0));
        assert!(group_mean(&population, 4.0) > group_mean(&population, 3.0));
    }

    #[test]
    fn test_init_uniform_conflict_groups() {
        let n = 2000;
        let population = initialized(&model(Mode::ConflictDir, 6), n, 3);

        assert!(population
            .iter()
            .all(|u| u.group >= 0.0 && u.group <= 5.0 && u.group.fract() == 0.0));
        for g in 0..6 {
            assert!(population.group_size(g as f64) > 0);
            assert!((group_mean(&population, g as f64) - 0.5).abs() < 0.1);
        }
    }

    #[test]
    fn test_discrimination_proportion_conflict_undir() {
        let mut config = model(Mode::ConflictUndir, 2);
        config.discriminators = 0.3;
        let n = 10_000;
        let population = initialized(&config, n, 4);

        let share = population.iter().filter(|u| u.discriminates).count() as f64 / n as f64;
        assert!((share - 0.3).abs() < 0.02, "share was {}", share);
    }

    #[test]
    fn test_isolated_modes_use_homophily_for_discrimination() {
        let mut config = model(Mode::Isolated1, 2);
        config.homophily_parameter = 0.8;
        config.discriminators = 0.0;
        let n = 5_000;
        let population = initialized(&config, n, 5);

        let share = population.iter().filter(|u| u.discriminates).count() as f64 / n as f64;
        assert!((share - 0.8).abs() < 0.03, "share was {}", share);
    }

    #[test]
    fn test_other_modes_never_discriminate() {
        let mut config = model(Mode::ReducedIntProb, 3);
        config.discriminators = 1.0;
        config.homophily_parameter = 1.0;
        let population = initialized(&config, 300, 6);
        assert!(population.iter().all(|u| !u.discriminates));
    }

    #[test]
    fn test_susceptibilities_and_tolerance() {
        let mut config = model(Mode::ReducedS, 3);
        config.susceptibility = 0.4;
        config.homophily_parameter = 0.25;
        config.tolerance = 0.2;
        let population = initialized(&config, 100, 7);

        for user in population.iter() {
            assert_eq!(user.susceptibility_1, 0.4);
            assert!((user.susceptibility_2 - 0.3).abs() < 1e-12);
            assert_eq!(user.tolerance, 0.2);
        }
    }

    #[test]
    fn test_extremism_tolerance() {
        let mut config = model(Mode::ConflictDir, 2);
        config.extremism = true;
        config.tolerance = 0.2;
        let population = initialized(&config, 100, 8);

        for user in population.iter() {
            assert!((user.tolerance - tolerance_func(user.opinion, 0.2)).abs() < 1e-12);
            assert!(user.tolerance >= 0.1 - 1e-12 && user.tolerance <= 0.2 + 1e-12);
        }
    }

    #[test]
    fn test_ageing_ages() {
        let config = ModelConfig {
            mode: Mode::Ageing,
            ageing: AgeingConfig {
                life_expectancy: 60.0,
                ..AgeingConfig::default()
            },
            ..ModelConfig::default()
        };
        let population = initialized(&config, 500, 9);

        assert!(population
            .iter()
            .all(|u| u.group >= CHILD_AGE && u.group <= 60.0 && u.group.fract() == 0.0));
        assert!(population.iter().any(|u| u.group == CHILD_AGE));
        assert!(population.iter().all(|u| !u.discriminates));
    }

    #[test]
    fn test_same_seed_same_population() {
        let config = model(Mode::ConflictUndir, 4);
        assert_eq!(initialized(&config, 200, 10), initialized(&config, 200, 10));
    }
}
