//! Read-only views of a refinement state for presentation layers.
//!
//! Nothing here mutates a `RefinementState`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::refine::{node_signature, Dimension, RefinementError, RefinementState};
use crate::store::GraphStore;
use crate::types::{Entity, Label, Labeling, NodeId, NodePair, NodeSignature, Signature};

/// Error type for inspection queries.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    /// The query only applies to another dimension.
    #[error("Inspection requires {expected}, state is {actual}")]
    WrongDimension {
        /// Dimension the query needs.
        expected: Dimension,
        /// Dimension of the state.
        actual: Dimension,
    },
    /// Node not labeled in the current generation.
    #[error("Node {0} is not part of this refinement")]
    UnknownNode(NodeId),
    /// Recomputing a signature failed.
    #[error(transparent)]
    Refinement(#[from] RefinementError),
}

/// How a node looked one generation back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousGeneration {
    /// Iteration of the previous generation.
    pub iteration: u32,
    /// Label in the previous generation.
    pub label: Label,
    /// Neighbor labels in the previous generation, ascending.
    pub neighbor_labels: Vec<Label>,
    /// Signature recomputed from the previous generation.
    pub signature: NodeSignature,
}

/// 1-WL view of a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInspection {
    /// Inspected node.
    pub node: NodeId,
    /// Current iteration of the run.
    pub iteration: u32,
    /// Current label.
    pub label: Label,
    /// Signature from the latest step; `None` before the first step.
    pub signature: Option<String>,
    /// Previous generation; `None` at generation 0.
    pub previous: Option<PreviousGeneration>,
    /// Neighbors, ascending.
    pub neighbors: Vec<NodeId>,
}

/// 2-WL view of one pair containing an inspected node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRow {
    /// The pair.
    pub pair: NodePair,
    /// Member of the pair other than the inspected node.
    pub other: NodeId,
    /// Current label.
    pub label: Label,
    /// Signature from the latest step; `None` before the first step.
    pub signature: Option<String>,
}

fn require(state: &RefinementState, expected: Dimension) -> Result<(), InspectError> {
    if state.dimension() == expected {
        Ok(())
    } else {
        Err(InspectError::WrongDimension {
            expected,
            actual: state.dimension(),
        })
    }
}

/// Inspect a node of a k=1 run.
pub fn inspect_node<G: GraphStore>(
    state: &RefinementState,
    graph: &G,
    node: NodeId,
) -> Result<NodeInspection, InspectError> {
    require(state, Dimension::One)?;

    let entity = Entity::Node(node);
    let label = state.label_of(&entity).ok_or(InspectError::UnknownNode(node))?;
    let neighbors = graph
        .neighbors(node)
        .map_err(|e| InspectError::Refinement(RefinementError::from_store(e)))?;

    let previous = match state.iteration().checked_sub(1) {
        Some(prev) => match state.history_at(prev) {
            Some(generation) => {
                let signature = node_signature(node, &generation.labels, graph)?;
                Some(PreviousGeneration {
                    iteration: prev,
                    label: signature.label,
                    neighbor_labels: signature.neighbors.clone(),
                    signature,
                })
            }
            None => None,
        },
        None => None,
    };

    Ok(NodeInspection {
        node,
        iteration: state.iteration(),
        label,
        signature: state.current_signatures().get(&entity).map(Signature::to_string),
        previous,
        neighbors,
    })
}

/// Every pair of a k=2 run that contains `node`, in pair order.
pub fn inspect_pairs(state: &RefinementState, node: NodeId) -> Result<Vec<PairRow>, InspectError> {
    require(state, Dimension::Two)?;

    let signatures = state.current_signatures();
    let rows: Vec<PairRow> = state
        .current_labels()
        .iter()
        .filter_map(|(entity, label)| {
            let pair = entity.as_pair()?;
            let other = pair.other(node)?;
            Some(PairRow {
                pair,
                other,
                label,
                signature: signatures.get(entity).map(Signature::to_string),
            })
        })
        .collect();

    // Every node of a graph with two or more nodes sits in some pair.
    if rows.is_empty() && state.snapshot().node_count > 1 {
        return Err(InspectError::UnknownNode(node));
    }
    Ok(rows)
}

/// Number of entities per label, ascending by label.
pub fn class_sizes(labeling: &Labeling) -> BTreeMap<Label, usize> {
    labeling.class_sizes()
}
