//! Core types for the refinement kernel.

pub mod node;
pub mod entity;
pub mod label;
pub mod signature;

pub use node::{NodeId, UndirectedEdge};
pub use entity::{Entity, NodePair};
pub use label::{Label, Labeling};
pub use signature::{NodeSignature, PairSignature, Signature};
