//! Statistics Output
//!
//! Opinion statistics of a population: moments, a histogram over [0, 1],
//! and average opinions per group or age band.

use opinion_events::{GroupAverage, OpinionHistogram, RunSummary};

use crate::components::Population;
use crate::config::Config;

/// Mean and population standard deviation of the opinions.
///
/// Both are 0 for an empty population.
pub fn opinion_moments(population: &Population) -> (f64, f64) {
    if population.is_empty() {
        return (0.0, 0.0);
    }
    let n = population.len() as f64;
    let mean = population.iter().map(|u| u.opinion).sum::<f64>() / n;
    let variance = population
        .iter()
        .map(|u| (u.opinion - mean).powi(2))
        .sum::<f64>()
        / n;
    (mean, variance.sqrt())
}

/// Counts of opinions over `bins` equal bins; an opinion of exactly 1 falls
/// in the last bin.
pub fn opinion_histogram(population: &Population, bins: usize) -> OpinionHistogram {
    let bins = bins.max(1);
    let mut counts = vec![0; bins];
    for user in population.iter() {
        let bin = ((user.opinion * bins as f64) as usize).min(bins - 1);
        counts[bin] += 1;
    }
    OpinionHistogram { counts }
}

/// Average opinion of each discrete group id in `0..num_groups`.
pub fn group_averages(population: &Population, num_groups: u32) -> Vec<GroupAverage> {
    (0..num_groups)
        .map(|g| {
            let lower = g as f64;
            band_average(population, format!("group_{}", g), lower, Some(lower + 1.0))
        })
        .collect()
}

/// Average opinion per age band. `edges` are the lower band edges in
/// ascending order; the last band is open-ended.
pub fn age_band_averages(population: &Population, edges: &[f64]) -> Vec<GroupAverage> {
    edges
        .iter()
        .enumerate()
        .map(|(i, &lower)| match edges.get(i + 1) {
            Some(&upper) => band_average(population, format!("{}-{}", lower, upper), lower, Some(upper)),
            None => band_average(population, format!("{}+", lower), lower, None),
        })
        .collect()
}

fn band_average(
    population: &Population,
    label: String,
    lower: f64,
    upper: Option<f64>,
) -> GroupAverage {
    let (members, sum) = population
        .iter()
        .filter(|u| u.group >= lower && upper.map_or(true, |up| u.group < up))
        .fold((0usize, 0.0), |(n, s), u| (n + 1, s + u.opinion));

    GroupAverage {
        label,
        lower,
        upper,
        members,
        mean_opinion: (members > 0).then(|| sum / members as f64),
    }
}

/// Group averages appropriate for the configured mode.
pub fn mode_group_averages(config: &Config, population: &Population) -> Vec<GroupAverage> {
    if config.model.mode.is_ageing() {
        age_band_averages(population, &config.model.ageing.age_groups)
    } else {
        group_averages(population, config.model.number_of_groups)
    }
}

/// Generate the final summary of a run
pub fn summarize(config: &Config, population: &Population, frames_written: u64) -> RunSummary {
    let (mean_opinion, opinion_std) = opinion_moments(population);
    RunSummary {
        mode: config.model.mode.to_string(),
        seed: config.simulation.seed,
        num_steps: config.simulation.num_steps,
        num_users: population.len(),
        frames_written,
        mean_opinion,
        opinion_std,
        group_averages: mode_group_averages(config, population),
        histogram: opinion_histogram(population, config.simulation.histogram_bins),
    }
}
