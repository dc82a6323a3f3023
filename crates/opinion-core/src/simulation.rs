//! Simulation Driver
//!
//! Owns the population, the random generator, and the step rule of a run,
//! and writes the time series at the configured interval.

use std::collections::HashMap;

use opinion_events::{OpinionFrame, RunSummary};

use crate::components::{Mode, Population};
use crate::config::Config;
use crate::error::SimError;
use crate::output::{opinion_moments, summarize, TimeSeriesWriter};
use crate::rng::SimRng;
use crate::setup::{create_network, initialize_users, Topology};
use crate::systems::Dynamics;

/// A configured and initialised run
#[derive(Debug, Clone)]
pub struct Simulation {
    config: Config,
    rng: SimRng,
    topology: Topology,
    population: Population,
    dynamics: Dynamics,
    time: u64,
}

impl Simulation {
    /// Validate the configuration, build the network, and initialise users.
    pub fn new(config: Config) -> Result<Self, SimError> {
        config.validate()?;

        let mut rng = SimRng::seed_from_u64(config.simulation.seed);
        let topology = create_network(&config.network, &mut rng);
        let mut population = Population::with_size(topology.num_vertices);
        initialize_users(&mut population, &config.model, &mut rng)?;

        if config.model.mode == Mode::ReducedIntProb {
            check_in_group_partners(&population)?;
        }

        let dynamics = Dynamics::from_config(&config.model);
        tracing::info!(
            "Initialized user network with {} vertices and {} edges",
            topology.num_vertices,
            topology.num_edges()
        );
        tracing::debug!("Selected mode {}", dynamics.mode());

        Ok(Self {
            config,
            rng,
            topology,
            population,
            dynamics,
            time: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn mode(&self) -> Mode {
        self.dynamics.mode()
    }

    /// Number of steps performed so far
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Perform one interaction.
    pub fn perform_step(&mut self) -> Result<(), SimError> {
        self.dynamics.step(&mut self.population, &mut self.rng)?;
        self.time += 1;
        Ok(())
    }

    /// Whether a frame is due at the current time
    pub fn should_write(&self) -> bool {
        let sim = &self.config.simulation;
        self.time >= sim.write_start && self.time % sim.write_every == 0
    }

    /// Whether a write at the current time is the last one of the run
    pub fn is_final_write(&self) -> bool {
        let sim = &self.config.simulation;
        self.time + sim.write_every > sim.num_steps
    }

    /// Snapshot of the population at the current time.
    ///
    /// Opinions are always included. Groups and discrimination flags are
    /// added on the final write, and groups on every write in ageing mode.
    pub fn frame(&self) -> OpinionFrame {
        let opinion = self.population.iter().map(|u| u.opinion as f32).collect();
        let mut frame = OpinionFrame::new(self.time, opinion);

        let is_final = self.is_final_write();
        if is_final || self.mode().is_ageing() {
            frame = frame.with_groups(self.population.iter().map(|u| u.group).collect());
        }
        if is_final {
            frame = frame.with_discriminators(
                self.population.iter().map(|u| u.discriminates).collect(),
            );
        }
        frame
    }

    fn write_data(&self, writer: &mut TimeSeriesWriter) -> Result<(), SimError> {
        writer.write_frame(&self.frame())?;
        let (mean, std) = opinion_moments(&self.population);
        tracing::info!(
            "t = {}: mean opinion {:.4}, std {:.4}",
            self.time,
            mean,
            std
        );
        Ok(())
    }

    /// Run all configured steps, writing metadata and frames to `writer`.
    pub fn run(&mut self, writer: &mut TimeSeriesWriter) -> Result<RunSummary, SimError> {
        writer.write_metadata(&self.topology.to_metadata())?;
        self.write_data(writer)?;

        let num_steps = self.config.simulation.num_steps;
        tracing::info!("Running {} steps in mode {}", num_steps, self.mode());
        while self.time < num_steps {
            self.perform_step()?;
            if self.should_write() {
                self.write_data(writer)?;
            }
        }
        writer.flush()?;

        tracing::info!(
            "Finished after {} steps, {} frames written",
            self.time,
            writer.frames_written()
        );
        Ok(summarize(&self.config, &self.population, writer.frames_written()))
    }
}

/// Every user must share its group with at least one other user for the
/// in-group resampling of `reduced_int_prob`.
fn check_in_group_partners(population: &Population) -> Result<(), SimError> {
    let mut sizes: HashMap<u64, usize> = HashMap::new();
    for u in population.iter() {
        *sizes.entry(u.group.to_bits()).or_insert(0) += 1;
    }
    for (user, u) in population.iter().enumerate() {
        if sizes[&u.group.to_bits()] < 2 {
            return Err(SimError::NoInGroupPartner {
                user,
                group: u.group,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::User;

    fn small_config(mode: Mode) -> Config {
        let mut config = Config::default();
        config.model.mode = mode;
        config.network.num_vertices = 50;
        config.simulation.num_steps = 100;
        config.simulation.write_every = 25;
        config
    }

    #[test]
    fn test_new_initializes_population() {
        let sim = Simulation::new(small_config(Mode::Isolated1)).unwrap();
        assert_eq!(sim.population().len(), 50);
        assert_eq!(sim.topology().num_vertices, 50);
        assert_eq!(sim.time(), 0);
        assert_eq!(sim.mode(), Mode::Isolated1);
    }

    #[test]
    fn test_invalid_config_fails_before_stepping() {
        let mut config = small_config(Mode::ReducedS);
        config.network.num_vertices = 1;
        assert!(matches!(Simulation::new(config), Err(SimError::Config(_))));
    }

    #[test]
    fn test_reduced_int_prob_needs_group_partners() {
        let mut config = small_config(Mode::ReducedIntProb);
        config.network.num_vertices = 3;
        config.model.number_of_groups = 3;
        assert!(matches!(
            Simulation::new(config),
            Err(SimError::NoInGroupPartner { .. })
        ));
    }

    #[test]
    fn test_in_group_partner_check() {
        let paired = Population::from_users(vec![
            User::new(0.0, 0.1),
            User::new(1.0, 0.2),
            User::new(0.0, 0.3),
            User::new(1.0, 0.4),
        ]);
        assert!(check_in_group_partners(&paired).is_ok());

        let single = Population::from_users(vec![
            User::new(0.0, 0.1),
            User::new(0.0, 0.2),
            User::new(2.0, 0.3),
        ]);
        assert!(matches!(
            check_in_group_partners(&single),
            Err(SimError::NoInGroupPartner { user: 2, .. })
        ));
    }

    #[test]
    fn test_frames_carry_groups_on_final_write() {
        let mut sim = Simulation::new(small_config(Mode::ConflictUndir)).unwrap();
        let first = sim.frame();
        assert_eq!(first.num_vertices(), 50);
        assert!(first.group.is_none());
        assert!(first.discriminates.is_none());

        for _ in 0..76 {
            sim.perform_step().unwrap();
        }
        let last = sim.frame();
        assert!(last.group.is_some());
        assert!(last.discriminates.is_some());
        assert!(last.is_consistent());
    }

    #[test]
    fn test_ageing_frames_always_carry_groups() {
        let sim = Simulation::new(small_config(Mode::Ageing)).unwrap();
        let frame = sim.frame();
        assert!(frame.group.is_some());
        assert!(frame.discriminates.is_none());
    }

    #[test]
    fn test_run_writes_on_schedule() {
        let mut config = small_config(Mode::ReducedS);
        config.simulation.write_start = 50;
        let mut sim = Simulation::new(config).unwrap();
        let mut writer = TimeSeriesWriter::null();

        let summary = sim.run(&mut writer).unwrap();
        // t = 0 plus 50, 75, 100
        assert_eq!(summary.frames_written, 4);
        assert_eq!(summary.num_users, 50);
        assert_eq!(sim.time(), 100);
    }
}
