//! Random Source
//!
//! The single seeded generator shared by initialization and every
//! interaction. Draw order determines the run for a fixed seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::SimError;

/// Upper bound on draws for every rejection-sampling loop
pub const MAX_SAMPLING_ATTEMPTS: usize = 100_000;

/// Seeded random number generator
#[derive(Debug, Clone)]
pub struct SimRng(pub SmallRng);

impl SimRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Uniform real in [0, 1)
    pub fn uniform_prob(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    /// Uniform real in [a, b]
    pub fn uniform_real(&mut self, a: f64, b: f64) -> f64 {
        if a >= b {
            return a;
        }
        self.0.gen_range(a..=b)
    }

    /// Uniform integer in [a, b]
    pub fn uniform_int(&mut self, a: i64, b: i64) -> i64 {
        if a >= b {
            return a;
        }
        self.0.gen_range(a..=b)
    }

    /// Uniform index in [0, n). `n` must be non-zero.
    pub fn index(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }

    /// True with probability `p`
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.uniform_prob() < p
    }

    /// Normally distributed real
    pub fn gaussian(&mut self, mu: f64, sigma: f64) -> Result<f64, SimError> {
        let normal = Normal::new(mu, sigma).map_err(|e| SimError::Distribution(e.to_string()))?;
        Ok(normal.sample(&mut self.0))
    }

    /// Normal draw truncated to [0, 1] by rejection.
    pub fn truncated_gaussian(&mut self, mu: f64, sigma: f64) -> Result<f64, SimError> {
        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            let value = self.gaussian(mu, sigma)?;
            if (0.0..=1.0).contains(&value) {
                return Ok(value);
            }
        }
        Err(SimError::SamplingExhausted {
            what: "truncated gaussian opinion",
            attempts: MAX_SAMPLING_ATTEMPTS,
        })
    }
}
