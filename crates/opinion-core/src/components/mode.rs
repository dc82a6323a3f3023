//! Interaction Modes
//!
//! The closed set of interaction policies. Exactly one is active per run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Interaction policy of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Users age and move through age groups; younger generations reject
    /// older generations' opinions
    Ageing,
    /// Lower group numbers reject higher groups' opinions, higher groups
    /// interact with lower ones at reduced susceptibility
    ConflictDir,
    /// Discriminators reject all opinions, everyone else interacts at
    /// reduced susceptibility
    ConflictUndir,
    /// Discriminators never update; non-discriminators interact with anyone
    #[serde(rename = "isolated_1")]
    Isolated1,
    /// Any discriminator in a pair blocks the exchange
    #[serde(rename = "isolated_2")]
    Isolated2,
    /// Inter-group interactions take place with reduced probability
    #[default]
    ReducedIntProb,
    /// Susceptibility is reduced for all interactions
    ReducedS,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Ageing,
        Mode::ConflictDir,
        Mode::ConflictUndir,
        Mode::Isolated1,
        Mode::Isolated2,
        Mode::ReducedIntProb,
        Mode::ReducedS,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Ageing => "ageing",
            Mode::ConflictDir => "conflict_dir",
            Mode::ConflictUndir => "conflict_undir",
            Mode::Isolated1 => "isolated_1",
            Mode::Isolated2 => "isolated_2",
            Mode::ReducedIntProb => "reduced_int_prob",
            Mode::ReducedS => "reduced_s",
        }
    }

    pub fn is_ageing(&self) -> bool {
        matches!(self, Mode::Ageing)
    }

    /// Modes whose groups are drawn at random rather than partitioned.
    pub fn draws_random_groups(&self) -> bool {
        matches!(self, Mode::ConflictDir | Mode::ConflictUndir)
    }

    /// Modes whose opinions start uniform regardless of group.
    pub fn uniform_opinions(&self) -> bool {
        matches!(self, Mode::ConflictDir | Mode::ConflictUndir | Mode::Ageing)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownMode(s.to_string()))
    }
}
