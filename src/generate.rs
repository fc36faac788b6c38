//! Graph generators for fixtures, benchmarks and the CLI.
//!
//! All generators number nodes `1..=n`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::store::InMemoryGraph;
use crate::types::{NodeId, UndirectedEdge};

/// Smallest accepted random graph size.
pub const MIN_RANDOM_SIZE: usize = 2;
/// Largest accepted random graph size.
pub const MAX_RANDOM_SIZE: usize = 100;

/// Error type for graph generation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    /// Size outside `MIN_RANDOM_SIZE..=MAX_RANDOM_SIZE`.
    #[error("Graph size must be between {MIN_RANDOM_SIZE} and {MAX_RANDOM_SIZE}, got {0}")]
    InvalidSize(usize),
    /// Density outside [0, 1].
    #[error("Graph density must be between 0 and 1, got {0}")]
    InvalidDensity(f64),
}

/// Erdős–Rényi graph: every pair `i < j` is an edge with probability `density`.
///
/// Seeded with ChaCha8 so the same seed yields the same graph on every platform.
pub fn random_graph(size: usize, density: f64, seed: u64) -> Result<InMemoryGraph, GenerateError> {
    if !(MIN_RANDOM_SIZE..=MAX_RANDOM_SIZE).contains(&size) {
        return Err(GenerateError::InvalidSize(size));
    }
    if !(0.0..=1.0).contains(&density) {
        return Err(GenerateError::InvalidDensity(density));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut graph = with_nodes(size);
    let size = size as u64;

    for i in 1..=size {
        for j in (i + 1)..=size {
            if rng.gen::<f64>() < density {
                insert_edges(&mut graph, [(i, j)]);
            }
        }
    }

    tracing::debug!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        density,
        seed,
        "Generated random graph"
    );

    Ok(graph)
}

/// Path `1 - 2 - ... - n`.
pub fn path(n: usize) -> InMemoryGraph {
    let mut graph = with_nodes(n);
    insert_edges(&mut graph, (1..n as u64).map(|i| (i, i + 1)));
    graph
}

/// Cycle `1 - 2 - ... - n - 1`. Needs `n >= 3` to close; smaller `n` gives a path.
pub fn cycle(n: usize) -> InMemoryGraph {
    let mut graph = path(n);
    if n >= 3 {
        insert_edges(&mut graph, [(n as u64, 1)]);
    }
    graph
}

/// Complete graph on `n` nodes.
pub fn complete(n: usize) -> InMemoryGraph {
    let mut graph = with_nodes(n);
    let n = n as u64;
    insert_edges(&mut graph, (1..=n).flat_map(|i| ((i + 1)..=n).map(move |j| (i, j))));
    graph
}

/// Star with center 1 and leaves `2..=n`.
pub fn star(n: usize) -> InMemoryGraph {
    let mut graph = with_nodes(n);
    insert_edges(&mut graph, (2..=n as u64).map(|leaf| (1, leaf)));
    graph
}

fn with_nodes(n: usize) -> InMemoryGraph {
    let mut graph = InMemoryGraph::new();
    for id in 1..=n as u64 {
        graph.add_node(NodeId::new(id));
    }
    graph
}

// Generators never produce self-loops; any that slip through are dropped.
fn insert_edges(graph: &mut InMemoryGraph, edges: impl IntoIterator<Item = (u64, u64)>) {
    for (u, v) in edges {
        if let Some(edge) = UndirectedEdge::new(NodeId::new(u), NodeId::new(v)) {
            graph.insert_edge(edge);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GraphStore;

    #[test]
    fn test_families() {
        assert_eq!(path(5).num_edges(), 4);
        assert_eq!(cycle(5).num_edges(), 5);
        assert_eq!(cycle(2).num_edges(), 1);
        assert_eq!(complete(5).num_edges(), 10);
        assert_eq!(star(5).num_edges(), 4);
        assert_eq!(star(5).degree(NodeId::new(1)).unwrap(), 4);
        assert_eq!(path(1).num_nodes(), 1);
        assert_eq!(path(0).num_nodes(), 0);
    }

    #[test]
    fn test_random_graph_validation() {
        assert_eq!(random_graph(1, 0.5, 0).unwrap_err(), GenerateError::InvalidSize(1));
        assert_eq!(random_graph(101, 0.5, 0).unwrap_err(), GenerateError::InvalidSize(101));
        assert_eq!(random_graph(10, 1.5, 0).unwrap_err(), GenerateError::InvalidDensity(1.5));
        assert!(random_graph(10, f64::NAN, 0).is_err());
    }

    #[test]
    fn test_random_graph_seeded() {
        let g1 = random_graph(30, 0.3, 42).unwrap();
        let g2 = random_graph(30, 0.3, 42).unwrap();
        assert_eq!(g1, g2);
        assert_eq!(g1.num_nodes(), 30);
    }

    #[test]
    fn test_random_graph_density_extremes() {
        assert_eq!(random_graph(10, 0.0, 1).unwrap().num_edges(), 0);
        assert_eq!(random_graph(10, 1.0, 1).unwrap().num_edges(), 45);
    }
}
