//! Network Metadata
//!
//! Topology of the user network, exported once per run.

use serde::{Deserialize, Serialize};

use crate::frame::VertexAttributes;

/// Vertex and edge structure of the user network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetadata {
    /// Name of the model that generated the edges
    pub model: String,
    pub num_vertices: usize,
    pub num_edges: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<(usize, usize)>,
    #[serde(default)]
    pub attributes: VertexAttributes,
}

impl NetworkMetadata {
    pub fn new(model: impl Into<String>, num_vertices: usize, edges: Vec<(usize, usize)>) -> Self {
        Self {
            model: model.into(),
            num_vertices,
            num_edges: edges.len(),
            edges,
            attributes: VertexAttributes::default(),
        }
    }
}
