//! Graph snapshot identity.
//!
//! A `GraphSnapshot` fingerprints the graph a refinement run was started on.
//! The run re-fingerprints the graph on every step and refuses to continue if
//! it changed, which is how the frozen-graph rule is enforced.

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::types::{NodeId, UndirectedEdge};
use crate::WL_KERNEL_SCHEMA_VERSION;

/// A deterministic fingerprint of a graph's node and edge sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Unique identifier for this snapshot (xxh64 of all components).
    pub snapshot_id: String,
    /// Number of nodes.
    pub node_count: u64,
    /// Number of undirected edges.
    pub edge_count: u64,
    /// Hash of sorted node ids.
    pub node_id_hash: String,
    /// Hash of sorted (lo, hi) edge pairs.
    pub edge_pair_hash: String,
}

/// Internal struct for computing snapshot_id hash.
#[derive(Serialize)]
struct SnapshotIdInput<'a> {
    node_count: u64,
    edge_count: u64,
    schema_version: &'a str,
    node_id_hash: &'a str,
    edge_pair_hash: &'a str,
}

impl GraphSnapshot {
    /// Compute a snapshot from node and edge lists.
    ///
    /// Input order does not matter; both lists are sorted before hashing.
    pub fn compute(nodes: &[NodeId], edges: &[UndirectedEdge]) -> Result<Self, serde_json::Error> {
        let mut node_ids: Vec<u64> = nodes.iter().map(NodeId::get).collect();
        node_ids.sort_unstable();
        node_ids.dedup();

        let mut edge_pairs: Vec<(u64, u64)> = edges
            .iter()
            .map(|e| (e.lo().get(), e.hi().get()))
            .collect();
        edge_pairs.sort_unstable();
        edge_pairs.dedup();

        let node_id_hash = canonical_hash_hex(&node_ids)?;
        let edge_pair_hash = canonical_hash_hex(&edge_pairs)?;
        let node_count = node_ids.len() as u64;
        let edge_count = edge_pairs.len() as u64;

        let snapshot_id = canonical_hash_hex(&SnapshotIdInput {
            node_count,
            edge_count,
            schema_version: WL_KERNEL_SCHEMA_VERSION,
            node_id_hash: &node_id_hash,
            edge_pair_hash: &edge_pair_hash,
        })?;

        Ok(Self {
            snapshot_id,
            node_count,
            edge_count,
            node_id_hash,
            edge_pair_hash,
        })
    }

    /// Whether another snapshot describes the same graph.
    pub fn matches(&self, other: &GraphSnapshot) -> bool {
        self.snapshot_id == other.snapshot_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: u64, b: u64) -> UndirectedEdge {
        UndirectedEdge::new(NodeId::new(a), NodeId::new(b)).unwrap()
    }

    fn nodes(ids: &[u64]) -> Vec<NodeId> {
        ids.iter().copied().map(NodeId::new).collect()
    }

    #[test]
    fn test_snapshot_determinism() {
        let s1 = GraphSnapshot::compute(&nodes(&[1, 2, 3]), &[edge(1, 2), edge(2, 3)]).unwrap();
        let s2 = GraphSnapshot::compute(&nodes(&[1, 2, 3]), &[edge(1, 2), edge(2, 3)]).unwrap();

        assert_eq!(s1, s2);
        assert_eq!(s1.node_count, 3);
        assert_eq!(s1.edge_count, 2);
    }

    #[test]
    fn test_snapshot_order_independence() {
        let s1 = GraphSnapshot::compute(&nodes(&[1, 2, 3]), &[edge(1, 2), edge(2, 3)]).unwrap();
        let s2 = GraphSnapshot::compute(&nodes(&[3, 1, 2]), &[edge(3, 2), edge(2, 1)]).unwrap();
        assert!(s1.matches(&s2));
    }

    #[test]
    fn test_snapshot_differs_on_change() {
        let s1 = GraphSnapshot::compute(&nodes(&[1, 2, 3]), &[edge(1, 2)]).unwrap();
        let s2 = GraphSnapshot::compute(&nodes(&[1, 2, 3]), &[edge(1, 3)]).unwrap();
        let s3 = GraphSnapshot::compute(&nodes(&[1, 2, 3, 4]), &[edge(1, 2)]).unwrap();

        assert!(!s1.matches(&s2));
        assert!(!s1.matches(&s3));
    }
}
