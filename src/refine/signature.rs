//! Signature functions.
//!
//! Pure functions of (entity, current labeling, graph). Nothing here touches
//! refinement state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::store::GraphStore;
use crate::types::{Entity, Label, Labeling, NodeId, NodePair, NodeSignature, PairSignature};
use super::config::{Dimension, Seeding};
use super::error::RefinementError;

/// Generation-0 signature, derived from the graph alone.
///
/// Only one family of variants occurs in a run, chosen by dimension and
/// seeding. `Connected` sorts before `NotConnected`, matching the ascending
/// order of the strings "connected" < "not connected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSignature {
    /// Same class for every node.
    Uniform,
    /// Node degree.
    Degree(usize),
    /// Pair of adjacent nodes.
    Connected,
    /// Pair of non-adjacent nodes.
    NotConnected,
    /// Sorted endpoint degrees plus adjacency.
    DegreePair {
        /// Endpoint degrees, smaller first.
        degrees: (usize, usize),
        /// Whether the endpoints are adjacent.
        connected: bool,
    },
}

impl fmt::Display for SeedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::Degree(d) => write!(f, "degree:{}", d),
            Self::Connected => write!(f, "connected"),
            Self::NotConnected => write!(f, "not connected"),
            Self::DegreePair { degrees, connected } => write!(
                f,
                "degs:{}-{}-conn:{}",
                degrees.0,
                degrees.1,
                u8::from(*connected)
            ),
        }
    }
}

/// Generation-0 signatures for every entity of the universe.
///
/// `nodes` must be the store's ascending node list.
pub fn seed_signatures<G: GraphStore>(
    dimension: Dimension,
    seeding: Seeding,
    nodes: &[NodeId],
    graph: &G,
) -> Result<BTreeMap<Entity, SeedSignature>, RefinementError> {
    let mut seeds = BTreeMap::new();

    match dimension {
        Dimension::One => {
            for &node in nodes {
                let seed = match seeding {
                    Seeding::Uniform => SeedSignature::Uniform,
                    Seeding::Degree => SeedSignature::Degree(
                        graph.degree(node).map_err(RefinementError::from_store)?,
                    ),
                };
                seeds.insert(Entity::Node(node), seed);
            }
        }
        Dimension::Two => {
            let degrees: BTreeMap<NodeId, usize> = match seeding {
                Seeding::Uniform => BTreeMap::new(),
                Seeding::Degree => nodes
                    .iter()
                    .map(|&n| graph.degree(n).map(|d| (n, d)))
                    .collect::<Result<_, _>>()
                    .map_err(RefinementError::from_store)?,
            };

            for pair in NodePair::all_pairs(nodes) {
                let connected = graph
                    .is_adjacent(pair.lo(), pair.hi())
                    .map_err(RefinementError::from_store)?;
                let seed = match seeding {
                    Seeding::Uniform if connected => SeedSignature::Connected,
                    Seeding::Uniform => SeedSignature::NotConnected,
                    Seeding::Degree => {
                        let a = degrees.get(&pair.lo()).copied().unwrap_or(0);
                        let b = degrees.get(&pair.hi()).copied().unwrap_or(0);
                        SeedSignature::DegreePair {
                            degrees: (a.min(b), a.max(b)),
                            connected,
                        }
                    }
                };
                seeds.insert(Entity::Pair(pair), seed);
            }
        }
    }

    Ok(seeds)
}

fn label_of(labels: &Labeling, entity: Entity) -> Result<Label, RefinementError> {
    labels
        .get(&entity)
        .ok_or(RefinementError::UnlabeledEntity(entity))
}

/// 1-WL signature of `node` under `labels`.
///
/// Two nodes get equal signatures iff they share a current label and the
/// same multiset of neighbor labels.
pub fn node_signature<G: GraphStore>(
    node: NodeId,
    labels: &Labeling,
    graph: &G,
) -> Result<NodeSignature, RefinementError> {
    let own = label_of(labels, Entity::Node(node))?;

    let neighbors = graph.neighbors(node).map_err(RefinementError::from_store)?;
    let neighbor_labels = neighbors
        .into_iter()
        .map(|neighbor| {
            labels
                .get(&Entity::Node(neighbor))
                .ok_or(RefinementError::DanglingNeighbor { node, neighbor })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NodeSignature::new(own, neighbor_labels))
}

/// Folklore 2-WL signature of `pair` under `labels`.
///
/// For every third node `w`, contributes `(label(u,w), label(v,w))` when both
/// are labeled. Cost is linear in `nodes`, so a full step is cubic.
pub fn pair_signature(
    pair: NodePair,
    labels: &Labeling,
    nodes: &[NodeId],
) -> Result<PairSignature, RefinementError> {
    let own = label_of(labels, Entity::Pair(pair))?;
    let (u, v) = (pair.lo(), pair.hi());

    let mut triangles = Vec::with_capacity(nodes.len().saturating_sub(2));
    for &w in nodes {
        if w == u || w == v {
            continue;
        }
        let uw = Entity::pair(u, w).and_then(|e| labels.get(&e));
        let vw = Entity::pair(v, w).and_then(|e| labels.get(&e));
        if let (Some(a), Some(b)) = (uw, vw) {
            triangles.push((a, b));
        }
    }

    Ok(PairSignature::new(own, triangles))
}
