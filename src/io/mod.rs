//! Input/output adapters.
//!
//! The refinement engine never parses text; these adapters turn edge-list
//! text into an `InMemoryGraph` and back.

pub mod edge_list;

pub use edge_list::{parse_edge_list, to_edge_list, BlockSummary, EdgeListError, ParsedEdgeList};
