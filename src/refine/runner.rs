//! Run-to-convergence driver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::canonical::partition_hash_hex;
use crate::store::GraphStore;
use crate::types::{Label, Labeling};
use crate::WL_KERNEL_SCHEMA_VERSION;
use super::config::RefinementConfig;
use super::error::RefinementError;
use super::state::RefinementState;

/// Summary of one generation in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Iteration of the generation.
    pub iteration: u32,
    /// Distinct labels.
    pub label_count: usize,
    /// Hash of the partition, independent of label numbering.
    pub partition_hash: String,
}

/// Result of a driven refinement run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementReport {
    /// Schema version of this report.
    pub schema_version: String,
    /// Config the run used.
    pub config: RefinementConfig,
    /// Hash of the config parameters.
    pub params_hash: String,
    /// Snapshot id of the input graph.
    pub snapshot_id: String,
    /// Committed iterations.
    pub iterations: u32,
    /// Whether the run reached a fixed point (false if stopped by `max_iterations`).
    pub converged: bool,
    /// One summary per generation, oldest first.
    pub generations: Vec<GenerationSummary>,
    /// Number of entities per label in the final generation.
    pub final_class_sizes: BTreeMap<Label, usize>,
    /// Labels of the final generation.
    pub final_labels: Labeling,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
}

/// Drives a refinement run over a shared graph store.
///
/// ## Algorithm
///
/// 1. Initialize generation 0 from the config
/// 2. Step until a step reports no change or `max_iterations` is reached
/// 3. Summarize every generation
pub struct Refiner<S: GraphStore> {
    store: Arc<S>,
    config: RefinementConfig,
}

impl<S: GraphStore> Refiner<S> {
    /// Create a new refiner.
    pub fn new(store: Arc<S>, config: RefinementConfig) -> Self {
        Self { store, config }
    }

    /// Run to convergence (or the iteration cap) and return the final state.
    pub fn run_state(&self) -> Result<RefinementState, RefinementError> {
        let mut state = RefinementState::with_config(self.config.clone(), self.store.as_ref())?;

        loop {
            if let Some(max) = self.config.max_iterations {
                if state.iteration() >= max {
                    tracing::info!(
                        max_iterations = max,
                        labels = state.label_count(),
                        "Iteration cap reached before convergence"
                    );
                    break;
                }
            }
            if !state.step(self.store.as_ref())?.changed() {
                break;
            }
        }

        Ok(state)
    }

    /// Run to convergence (or the iteration cap) and summarize.
    pub fn run(&self) -> Result<RefinementReport, RefinementError> {
        let state = self.run_state()?;
        report(&state)
    }

    /// Get the config.
    pub fn config(&self) -> &RefinementConfig {
        &self.config
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Summarize a refinement state.
pub fn report(state: &RefinementState) -> Result<RefinementReport, RefinementError> {
    let generations = state
        .history()
        .iter()
        .map(|g| {
            Ok(GenerationSummary {
                iteration: g.iteration,
                label_count: g.labels.distinct_count(),
                partition_hash: partition_hash_hex(&g.labels)?,
            })
        })
        .collect::<Result<Vec<_>, RefinementError>>()?;

    Ok(RefinementReport {
        schema_version: WL_KERNEL_SCHEMA_VERSION.to_string(),
        config: state.config().clone(),
        params_hash: state.config().params_hash()?,
        snapshot_id: state.snapshot().snapshot_id.clone(),
        iterations: state.iteration(),
        converged: state.converged(),
        generations,
        final_class_sizes: state.current_labels().class_sizes(),
        final_labels: state.current_labels().clone(),
        generated_at: Utc::now(),
    })
}
