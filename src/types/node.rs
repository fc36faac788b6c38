//! Node and edge types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node in the graph.
///
/// Node ids are non-negative and need not be contiguous.
/// Implements `Ord` so every collection keyed by node iterates deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a new NodeId.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Undirected edge between two distinct nodes.
///
/// Always stored with the smaller endpoint first, so `(a, b)` and `(b, a)`
/// compare equal. The derived `Ord` is (lo, hi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UndirectedEdge {
    lo: NodeId,
    hi: NodeId,
}

impl UndirectedEdge {
    /// Create a canonical edge. Returns `None` for a self-loop.
    pub fn new(a: NodeId, b: NodeId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(Self { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Smaller endpoint.
    pub fn lo(&self) -> NodeId {
        self.lo
    }

    /// Larger endpoint.
    pub fn hi(&self) -> NodeId {
        self.hi
    }

    /// Whether `node` is one of the endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.lo == node || self.hi == node
    }
}

impl fmt::Display for UndirectedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}
