//! Refinement state manager.
//!
//! `RefinementState` is a caller-owned value: `initialize` builds it,
//! `step` advances it in place. Independent runs are independent values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::snapshot::GraphSnapshot;
use crate::store::GraphStore;
use crate::types::{Entity, Label, Labeling, NodeId, Signature};
use super::compress::compress;
use super::config::{Dimension, RefinementConfig};
use super::error::RefinementError;
use super::history::{Generation, History};
use super::signature::{node_signature, pair_signature, seed_signatures};

/// Result of one `step` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    /// A new generation was committed.
    Changed {
        /// Iteration of the new generation.
        iteration: u32,
        /// Distinct labels in the new generation.
        label_count: usize,
    },
    /// Labels are stable; the run is converged.
    Unchanged {
        /// Iteration the run converged at.
        iteration: u32,
    },
}

impl StepOutcome {
    /// Whether the step committed a new generation.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// Iteration after the step.
    pub fn iteration(&self) -> u32 {
        match self {
            Self::Changed { iteration, .. } | Self::Unchanged { iteration } => *iteration,
        }
    }
}

/// State of one refinement run over one frozen graph.
///
/// ## Invariants
///
/// - `labels` holds exactly one entry per entity of the universe
///   (nodes for k=1, all pairs of distinct nodes for k=2)
/// - `history.at(i).iteration == i`, and the latest generation equals `labels`
/// - once `converged`, no method changes labels, iteration or history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementState {
    config: RefinementConfig,
    snapshot: GraphSnapshot,
    iteration: u32,
    labels: Labeling,
    #[serde(with = "signature_entries")]
    signatures: BTreeMap<Entity, Signature>,
    converged: bool,
    history: History,
}

impl RefinementState {
    /// Initialize a run for dimension `k` with default seeding.
    pub fn initialize<G: GraphStore>(k: u8, graph: &G) -> Result<Self, RefinementError> {
        Self::with_config(RefinementConfig::new(k)?, graph)
    }

    /// Initialize a run from a full config.
    ///
    /// Produces generation 0: seed signatures compressed to dense labels.
    pub fn with_config<G: GraphStore>(
        config: RefinementConfig,
        graph: &G,
    ) -> Result<Self, RefinementError> {
        let nodes = graph.all_node_ids().map_err(RefinementError::from_store)?;
        let snapshot = capture_snapshot(graph, &nodes)?;

        let seeds = seed_signatures(config.dimension, config.seeding, &nodes, graph)?;
        let compression = compress(&seeds)?;

        tracing::info!(
            k = config.dimension.k(),
            seeding = %config.seeding,
            snapshot_id = %snapshot.snapshot_id,
            nodes = nodes.len(),
            entities = compression.labels.len(),
            labels = compression.distinct,
            "Initialized refinement"
        );

        Ok(Self {
            history: History::start(compression.labels.clone()),
            labels: compression.labels,
            config,
            snapshot,
            iteration: 0,
            signatures: BTreeMap::new(),
            converged: false,
        })
    }

    /// Run one refinement iteration against `graph`.
    ///
    /// `graph` must be the graph the state was initialized on. On a converged
    /// state this is a no-op returning `Unchanged`. Nothing is mutated unless
    /// the whole generation was computed successfully.
    pub fn step<G: GraphStore>(&mut self, graph: &G) -> Result<StepOutcome, RefinementError> {
        if self.converged {
            tracing::debug!(iteration = self.iteration, "Step on converged state ignored");
            return Ok(StepOutcome::Unchanged { iteration: self.iteration });
        }

        let nodes = graph.all_node_ids().map_err(RefinementError::from_store)?;
        let current = capture_snapshot(graph, &nodes)?;
        if !self.snapshot.matches(&current) {
            return Err(RefinementError::SnapshotMismatch {
                expected: self.snapshot.snapshot_id.clone(),
                actual: current.snapshot_id,
            });
        }

        let signatures = self.compute_signatures(graph, &nodes)?;
        let compression = compress(&signatures)?;

        let changed = compression.labels.len() != self.labels.len()
            || self
                .labels
                .iter()
                .any(|(entity, label)| compression.labels.get(entity) != Some(label));

        // Signatures of the latest step are kept even when the labels are not.
        self.signatures = signatures;

        if !changed {
            self.converged = true;
            tracing::info!(
                k = self.config.dimension.k(),
                iteration = self.iteration,
                labels = compression.distinct,
                "Refinement converged"
            );
            return Ok(StepOutcome::Unchanged { iteration: self.iteration });
        }

        self.iteration = self.history.push(compression.labels.clone());
        self.labels = compression.labels;

        tracing::debug!(
            iteration = self.iteration,
            labels = compression.distinct,
            "Committed generation"
        );

        Ok(StepOutcome::Changed {
            iteration: self.iteration,
            label_count: compression.distinct,
        })
    }

    fn compute_signatures<G: GraphStore>(
        &self,
        graph: &G,
        nodes: &[NodeId],
    ) -> Result<BTreeMap<Entity, Signature>, RefinementError> {
        let mut signatures = BTreeMap::new();
        for entity in self.labels.entities() {
            let signature = match (self.config.dimension, entity) {
                (Dimension::One, Entity::Node(node)) => {
                    Signature::Node(node_signature(*node, &self.labels, graph)?)
                }
                (Dimension::Two, Entity::Pair(pair)) => {
                    Signature::Pair(pair_signature(*pair, &self.labels, nodes)?)
                }
                // A labeling of the wrong entity kind cannot be refined.
                _ => return Err(RefinementError::UnlabeledEntity(*entity)),
            };
            signatures.insert(*entity, signature);
        }
        Ok(signatures)
    }

    /// Config the run was initialized with.
    pub fn config(&self) -> &RefinementConfig {
        &self.config
    }

    /// Refinement dimension.
    pub fn dimension(&self) -> Dimension {
        self.config.dimension
    }

    /// Numeric k (1 or 2).
    pub fn k(&self) -> u8 {
        self.config.dimension.k()
    }

    /// Fingerprint of the graph the run is bound to.
    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }

    /// Current iteration (number of committed steps).
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Whether a step has found the labels stable.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Labels of the current generation.
    pub fn current_labels(&self) -> &Labeling {
        &self.labels
    }

    /// Signatures computed by the most recent step, converging or not.
    ///
    /// Empty right after initialization.
    pub fn current_signatures(&self) -> &BTreeMap<Entity, Signature> {
        &self.signatures
    }

    /// Current label of an entity.
    pub fn label_of(&self, entity: &Entity) -> Option<Label> {
        self.labels.get(entity)
    }

    /// Number of distinct labels in the current generation.
    pub fn label_count(&self) -> usize {
        self.labels.distinct_count()
    }

    /// Generation `iteration`, if it exists.
    pub fn history_at(&self, iteration: u32) -> Option<&Generation> {
        self.history.at(iteration)
    }

    /// Full history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Label of `entity` as it was `generations_ago` generations ago.
    pub fn label_generations_ago(&self, entity: &Entity, generations_ago: u32) -> Option<Label> {
        self.history.label_generations_ago(entity, generations_ago)
    }
}

fn capture_snapshot<G: GraphStore>(
    graph: &G,
    nodes: &[NodeId],
) -> Result<GraphSnapshot, RefinementError> {
    let edges = graph.all_edges().map_err(RefinementError::from_store)?;
    Ok(GraphSnapshot::compute(nodes, &edges)?)
}

/// Serde adapter: signatures as a list of `[entity, signature]` entries.
mod signature_entries {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    use crate::types::{Entity, Signature};

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<Entity, Signature>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<Entity, Signature>, D::Error> {
        let entries: Vec<(Entity, Signature)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
