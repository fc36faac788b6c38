//! Graph storage backends.
//!
//! The refinement engine only reads graphs; it never mutates a store.

pub mod memory;

use crate::types::{NodeId, UndirectedEdge};

/// Read-only query interface over an undirected graph.
///
/// Implementations must guarantee deterministic ordering of results:
/// node ids ascending.
pub trait GraphStore {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync;

    /// All node ids, ascending and duplicate-free.
    fn all_node_ids(&self) -> Result<Vec<NodeId>, Self::Error>;

    /// Neighbors of a node, ascending.
    fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, Self::Error>;

    /// Whether `u` and `v` share an edge.
    fn is_adjacent(&self, u: NodeId, v: NodeId) -> Result<bool, Self::Error>;

    /// Number of neighbors of a node.
    fn degree(&self, id: NodeId) -> Result<usize, Self::Error> {
        Ok(self.neighbors(id)?.len())
    }

    /// All edges in canonical order, derived from the neighbor query.
    fn all_edges(&self) -> Result<Vec<UndirectedEdge>, Self::Error> {
        let mut edges = Vec::new();
        for node in self.all_node_ids()? {
            for neighbor in self.neighbors(node)? {
                if node < neighbor {
                    edges.extend(UndirectedEdge::new(node, neighbor));
                }
            }
        }
        Ok(edges)
    }
}

pub use memory::{GraphError, InMemoryGraph};
