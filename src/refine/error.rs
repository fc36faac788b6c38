//! Refinement error type.

use crate::types::{Entity, NodeId};

/// Error type for refinement operations.
///
/// None of these are transient: every operation is deterministic, so
/// retrying with the same inputs fails the same way.
#[derive(Debug, thiserror::Error)]
pub enum RefinementError {
    /// Dimension outside {1, 2}.
    #[error("k={0} is not supported (expected 1 or 2)")]
    UnsupportedDimension(u8),
    /// The graph store failed to answer a query.
    #[error("Store error: {0}")]
    Store(String),
    /// The store reported a neighbor that is not in the labeled node set.
    #[error("Node {node} has neighbor {neighbor} outside the labeled node set")]
    DanglingNeighbor {
        /// Node whose neighbors were queried.
        node: NodeId,
        /// Neighbor with no label.
        neighbor: NodeId,
    },
    /// An entity that should be labeled in the current generation is not.
    #[error("Entity {0} has no label in the current generation")]
    UnlabeledEntity(Entity),
    /// More distinct signatures than representable labels.
    #[error("{0} distinct signatures exceed the label range")]
    LabelOverflow(usize),
    /// The graph changed since the run was initialized.
    #[error("Graph snapshot mismatch: initialized on {expected}, stepped on {actual}")]
    SnapshotMismatch {
        /// Snapshot id captured at initialization.
        expected: String,
        /// Snapshot id of the graph passed to step.
        actual: String,
    },
    /// Canonical serialization failed while hashing.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RefinementError {
    /// Create a store error from any error type.
    pub fn from_store<E: std::error::Error>(e: E) -> Self {
        Self::Store(e.to_string())
    }
}
