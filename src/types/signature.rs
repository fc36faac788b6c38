//! Signatures: the generation-local fingerprints labels are compressed from.
//!
//! The derived `Ord` impls give the strict total order compression relies on:
//! the entity's own label compared numerically, then the sorted summary
//! compared elementwise, then by length.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::label::Label;

/// 1-WL signature: a node's label plus its sorted neighbor labels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeSignature {
    /// Current label of the node.
    pub label: Label,
    /// Labels of all neighbors, ascending.
    pub neighbors: Vec<Label>,
}

impl NodeSignature {
    /// Build a signature, sorting the neighbor labels.
    pub fn new(label: Label, mut neighbors: Vec<Label>) -> Self {
        neighbors.sort_unstable();
        Self { label, neighbors }
    }
}

impl fmt::Display for NodeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|", self.label)?;
        for (i, l) in self.neighbors.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", l)?;
        }
        Ok(())
    }
}

/// Folklore 2-WL signature: a pair's label plus the sorted multiset of
/// triangle label pairs `(label(u,w), label(v,w))` over every third node `w`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairSignature {
    /// Current label of the pair.
    pub label: Label,
    /// One entry per third node, each smaller-first, sorted lexicographically.
    pub triangles: Vec<(Label, Label)>,
}

impl PairSignature {
    /// Build a signature, canonicalizing each triangle and sorting the multiset.
    pub fn new(label: Label, triangles: Vec<(Label, Label)>) -> Self {
        let mut triangles: Vec<(Label, Label)> = triangles
            .into_iter()
            .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
            .collect();
        triangles.sort_unstable();
        Self { label, triangles }
    }
}

impl fmt::Display for PairSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|[", self.label)?;
        for (i, (a, b)) in self.triangles.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "({},{})", a, b)?;
        }
        f.write_str("]")
    }
}

/// Signature of any entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signature {
    /// Signature of a node (k=1).
    Node(NodeSignature),
    /// Signature of a node pair (k=2).
    Pair(PairSignature),
}

impl Signature {
    /// Label the signature was built from.
    pub fn label(&self) -> Label {
        match self {
            Self::Node(s) => s.label,
            Self::Pair(s) => s.label,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(s) => s.fmt(f),
            Self::Pair(s) => s.fmt(f),
        }
    }
}
