//! Weisfeiler-Leman refinement engine.
//!
//! ```text
//! initialize(config, graph) → seed signatures → compress → generation 0
//! step(graph)               → signatures(current labels) → compress
//!                           → changed?  commit + history : converged
//! ```

pub mod config;
pub mod error;
pub mod compress;
pub mod signature;
pub mod history;
pub mod state;
pub mod runner;

pub use config::{Dimension, RefinementConfig, Seeding};
pub use error::RefinementError;
pub use compress::{compress, Compression};
pub use signature::{node_signature, pair_signature, seed_signatures, SeedSignature};
pub use history::{Generation, History};
pub use state::{RefinementState, StepOutcome};
pub use runner::{report, GenerationSummary, RefinementReport, Refiner};
