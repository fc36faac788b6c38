//! # wl-kernel
//!
//! Deterministic Weisfeiler-Leman color refinement over undirected graphs.
//!
//! The kernel answers one question:
//!
//! > Which nodes (k=1) or node pairs (k=2) can color refinement tell apart?
//!
//! ## Core Contract
//!
//! 1. Seed every entity with a label (generation 0)
//! 2. Each step builds a signature per entity from the previous generation
//!    and compresses signatures into dense labels `0..m`
//! 3. A step that does not split any class leaves the labels untouched and
//!    marks the run converged
//! 4. Every committed generation is kept, so any past labeling can be replayed
//!
//! ## Architecture
//!
//! ```text
//! edge list → InMemoryGraph → RefinementState::step* → History → RefinementReport
//!                  ↓                   ↑
//!             GraphSnapshot ───────────┘ (graph must not change mid-run)
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same graph + same config → identical labels in every generation
//! - Signature order is numeric, so an unchanged partition yields identical labels
//! - Entity ordering is canonical (by `NodeId`, pairs as `(lo, hi)`)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod store;
pub mod canonical;
pub mod snapshot;
pub mod refine;
pub mod generate;
pub mod io;
pub mod inspect;

// Re-exports
pub use types::{
    Entity, Label, Labeling, NodeId, NodePair, NodeSignature, PairSignature, Signature,
    UndirectedEdge,
};
pub use store::{GraphError, GraphStore, InMemoryGraph};
pub use canonical::{canonical_hash, canonical_hash_hex, partition_hash_hex, to_canonical_bytes};
pub use snapshot::GraphSnapshot;
pub use refine::{
    Dimension, Generation, GenerationSummary, History, RefinementConfig, RefinementError,
    RefinementReport, RefinementState, Refiner, Seeding, StepOutcome,
};
pub use generate::{random_graph, GenerateError};
pub use io::{parse_edge_list, to_edge_list, EdgeListError, ParsedEdgeList};
pub use inspect::{class_sizes, inspect_node, inspect_pairs, InspectError, NodeInspection, PairRow};

/// Schema version for reports and snapshots.
pub const WL_KERNEL_SCHEMA_VERSION: &str = "1.0.0";

/// Version tag carried by the default `RefinementConfig`.
pub const DEFAULT_CONFIG_VERSION: &str = "wl_refine_v1";
