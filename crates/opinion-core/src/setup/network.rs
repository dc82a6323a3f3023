//! Network Setup
//!
//! Builds the vertex container and edge list of the user network. The
//! interaction rules select partners uniformly from all users, so the edges
//! are only carried through to the exported metadata.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use opinion_events::NetworkMetadata;

use crate::config::NetworkConfig;
use crate::rng::SimRng;

/// Graph generator for the user network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GraphModel {
    /// Uniformly random edges with the configured mean degree
    #[default]
    ErdosRenyi,
    /// Ring lattice linking each vertex to its nearest neighbours
    Regular,
    /// Vertices only
    Empty,
}

impl GraphModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphModel::ErdosRenyi => "erdos_renyi",
            GraphModel::Regular => "regular",
            GraphModel::Empty => "empty",
        }
    }
}

/// Vertex count and undirected edges of the user network
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    pub model: GraphModel,
    pub num_vertices: usize,
    /// Each edge stored once with the smaller vertex first
    pub edges: Vec<(usize, usize)>,
}

impl Topology {
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn to_metadata(&self) -> NetworkMetadata {
        NetworkMetadata::new(self.model.as_str(), self.num_vertices, self.edges.clone())
    }
}

/// Create the user network from configuration
pub fn create_network(config: &NetworkConfig, rng: &mut SimRng) -> Topology {
    let n = config.num_vertices;
    let edges = match config.model {
        GraphModel::ErdosRenyi => erdos_renyi_edges(n, config.mean_degree, rng),
        GraphModel::Regular => regular_edges(n, config.mean_degree),
        GraphModel::Empty => Vec::new(),
    };
    tracing::debug!(
        "Created {} network with {} vertices and {} edges",
        config.model.as_str(),
        n,
        edges.len()
    );
    Topology {
        model: config.model,
        num_vertices: n,
        edges,
    }
}

fn max_edges(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Random graph with `n * mean_degree / 2` distinct edges and no self-loops
fn erdos_renyi_edges(n: usize, mean_degree: usize, rng: &mut SimRng) -> Vec<(usize, usize)> {
    let max = max_edges(n);
    let target = (n * mean_degree / 2).min(max);
    if target == 0 {
        return Vec::new();
    }

    // Dense graphs: shuffle the complete edge list instead of rejecting duplicates
    if target * 2 > max {
        let mut all: Vec<(usize, usize)> = (0..n)
            .flat_map(|a| (a + 1..n).map(move |b| (a, b)))
            .collect();
        all.shuffle(&mut rng.0);
        all.truncate(target);
        all.sort_unstable();
        return all;
    }

    let mut seen = HashSet::with_capacity(target);
    let mut edges = Vec::with_capacity(target);
    while edges.len() < target {
        let a = rng.index(n);
        let b = rng.index(n);
        if a == b {
            continue;
        }
        let edge = ordered(a, b);
        if seen.insert(edge) {
            edges.push(edge);
        }
    }
    edges
}

/// Ring lattice with `mean_degree / 2` neighbours on each side
fn regular_edges(n: usize, mean_degree: usize) -> Vec<(usize, usize)> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    if n < 2 {
        return edges;
    }
    for v in 0..n {
        for offset in 1..=(mean_degree / 2) {
            let w = (v + offset) % n;
            if w == v {
                continue;
            }
            let edge = ordered(v, w);
            if seen.insert(edge) {
                edges.push(edge);
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(model: GraphModel, n: usize, k: usize) -> NetworkConfig {
        NetworkConfig {
            num_vertices: n,
            model,
            mean_degree: k,
        }
    }

    #[test]
    fn test_erdos_renyi_edge_count() {
        let mut rng = SimRng::seed_from_u64(42);
        let topo = create_network(&config(GraphModel::ErdosRenyi, 100, 4), &mut rng);

        assert_eq!(topo.num_vertices, 100);
        assert_eq!(topo.num_edges(), 200);
        let unique: HashSet<_> = topo.edges.iter().collect();
        assert_eq!(unique.len(), 200);
        assert!(topo.edges.iter().all(|&(a, b)| a < b && b < 100));
    }

    #[test]
    fn test_dense_erdos_renyi_is_clamped() {
        let mut rng = SimRng::seed_from_u64(42);
        let topo = create_network(&config(GraphModel::ErdosRenyi, 5, 20), &mut rng);
        assert_eq!(topo.num_edges(), 10);
    }

    #[test]
    fn test_regular_ring() {
        let mut rng = SimRng::seed_from_u64(0);
        let topo = create_network(&config(GraphModel::Regular, 6, 2), &mut rng);
        assert_eq!(topo.num_edges(), 6);
        assert!(topo.edges.contains(&(0, 5)));
    }

    #[test]
    fn test_empty_network_metadata() {
        let mut rng = SimRng::seed_from_u64(0);
        let topo = create_network(&config(GraphModel::Empty, 10, 4), &mut rng);
        let meta = topo.to_metadata();
        assert_eq!(meta.model, "empty");
        assert_eq!(meta.num_vertices, 10);
        assert_eq!(meta.num_edges, 0);
    }
}
