//! Time-Series Frames
//!
//! Per-vertex attribute arrays written at each output interval.
//!
//! Every array in a frame holds exactly one scalar per vertex, indexed by the
//! vertex id of the population.

use serde::{Deserialize, Serialize};

use crate::topology::NetworkMetadata;

/// Name of the single dimension of every per-vertex array
pub const DIM_NAME_VERTEX: &str = "vertex";

/// Coordinates of the vertex dimension are the plain indices
pub const COORDS_MODE_TRIVIAL: &str = "trivial";

/// Attribute tags marking an array as per-vertex data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexAttributes {
    #[serde(rename = "dim_name__1")]
    pub dim_name: String,
    #[serde(rename = "coords_mode__vertex")]
    pub coords_mode: String,
}

impl Default for VertexAttributes {
    fn default() -> Self {
        Self {
            dim_name: DIM_NAME_VERTEX.to_string(),
            coords_mode: COORDS_MODE_TRIVIAL.to_string(),
        }
    }
}

/// One write of the time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpinionFrame {
    pub time: u64,
    /// Opinion of every user, always present
    pub opinion: Vec<f32>,
    /// Group label (or age) of every user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<f64>>,
    /// Discrimination flag of every user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminates: Option<Vec<bool>>,
}

impl OpinionFrame {
    /// Creates a frame carrying only the opinions.
    pub fn new(time: u64, opinion: Vec<f32>) -> Self {
        Self {
            time,
            opinion,
            group: None,
            discriminates: None,
        }
    }

    pub fn with_groups(mut self, group: Vec<f64>) -> Self {
        self.group = Some(group);
        self
    }

    pub fn with_discriminators(mut self, discriminates: Vec<bool>) -> Self {
        self.discriminates = Some(discriminates);
        self
    }

    /// Number of vertices covered by this frame.
    pub fn num_vertices(&self) -> usize {
        self.opinion.len()
    }

    /// Whether the group and discrimination arrays match the opinion array.
    pub fn is_consistent(&self) -> bool {
        let n = self.opinion.len();
        self.group.as_ref().map_or(true, |g| g.len() == n)
            && self.discriminates.as_ref().map_or(true, |d| d.len() == n)
    }
}

/// A single line of the time-series file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Record {
    Metadata(NetworkMetadata),
    Frame(OpinionFrame),
}
