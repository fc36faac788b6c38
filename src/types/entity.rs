//! Entities: the units that receive labels.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::node::NodeId;

/// Unordered pair of distinct nodes, the entity of 2-dimensional refinement.
///
/// Canonical form has the smaller id first. This is the map key used for
/// pair labels; there is no string encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodePair {
    lo: NodeId,
    hi: NodeId,
}

impl NodePair {
    /// Create a canonical pair. Returns `None` when `a == b`.
    pub fn new(a: NodeId, b: NodeId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(Self { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Smaller node.
    pub fn lo(&self) -> NodeId {
        self.lo
    }

    /// Larger node.
    pub fn hi(&self) -> NodeId {
        self.hi
    }

    /// Whether `node` is a member of the pair.
    pub fn contains(&self, node: NodeId) -> bool {
        self.lo == node || self.hi == node
    }

    /// The member that is not `node`, if `node` is a member.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.lo == node {
            Some(self.hi)
        } else if self.hi == node {
            Some(self.lo)
        } else {
            None
        }
    }

    /// All pairs over `nodes`, in canonical order.
    ///
    /// `nodes` must be sorted ascending and duplicate-free.
    pub fn all_pairs(nodes: &[NodeId]) -> Vec<NodePair> {
        let mut pairs = Vec::with_capacity(nodes.len() * nodes.len().saturating_sub(1) / 2);
        for (i, &u) in nodes.iter().enumerate() {
            for &v in &nodes[i + 1..] {
                pairs.push(NodePair { lo: u, hi: v });
            }
        }
        pairs
    }
}

impl fmt::Display for NodePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}

/// A labeled unit: a node (k=1) or a node pair (k=2).
///
/// A labeling only ever holds one variant; the `Ord` across variants exists
/// so `Entity` can key ordered maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    /// Single node.
    Node(NodeId),
    /// Unordered pair of distinct nodes.
    Pair(NodePair),
}

impl Entity {
    /// Entity for a node pair. Returns `None` when `a == b`.
    pub fn pair(a: NodeId, b: NodeId) -> Option<Self> {
        NodePair::new(a, b).map(Self::Pair)
    }

    /// The node, if this is a node entity.
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Self::Node(n) => Some(*n),
            Self::Pair(_) => None,
        }
    }

    /// The pair, if this is a pair entity.
    pub fn as_pair(&self) -> Option<NodePair> {
        match self {
            Self::Node(_) => None,
            Self::Pair(p) => Some(*p),
        }
    }
}

impl From<NodeId> for Entity {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<NodePair> for Entity {
    fn from(pair: NodePair) -> Self {
        Self::Pair(pair)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(n) => write!(f, "{}", n),
            Self::Pair(p) => write!(f, "{}", p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u64) -> NodeId {
        NodeId::new(id)
    }

    #[test]
    fn test_pair_canonical() {
        let p1 = NodePair::new(n(5), n(2)).unwrap();
        let p2 = NodePair::new(n(2), n(5)).unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.lo(), n(2));
        assert_eq!(p1.other(n(2)), Some(n(5)));
        assert_eq!(p1.other(n(9)), None);
        assert!(NodePair::new(n(3), n(3)).is_none());
    }

    #[test]
    fn test_all_pairs_count_and_order() {
        let nodes = [n(1), n(4), n(9), n(10)];
        let pairs = NodePair::all_pairs(&nodes);

        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], NodePair::new(n(1), n(4)).unwrap());
        assert_eq!(pairs[5], NodePair::new(n(9), n(10)).unwrap());
        assert!(pairs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_all_pairs_degenerate() {
        assert!(NodePair::all_pairs(&[]).is_empty());
        assert!(NodePair::all_pairs(&[n(1)]).is_empty());
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(Entity::Node(n(3)).to_string(), "3");
        assert_eq!(Entity::pair(n(4), n(1)).unwrap().to_string(), "(1, 4)");
    }
}
