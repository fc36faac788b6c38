//! Edge-list text codec.
//!
//! ## Format
//!
//! ```text
//! [(1, 2), (2, 3), (4, )]  [(1, 2)]
//! ```
//!
//! - `(u, v)` is an undirected edge, `(u, )` declares an isolated node
//! - whitespace is insignificant
//! - each `[...]` block is a separate graph; ids of a block are shifted by
//!   the number of distinct nodes loaded from the blocks before it, so
//!   several graphs load side by side as one disjoint union
//! - any malformed block rejects the whole input

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex_lite::Regex;

use crate::store::InMemoryGraph;
use crate::types::{NodeId, UndirectedEdge};

const BLOCK_PATTERN: &str = r"^\(\d+,\d*\)(,\(\d+,\d*\))*$";
const TUPLE_PATTERN: &str = r"\((\d+),(\d*)\)";

/// Error type for edge-list parsing.
#[derive(Debug, thiserror::Error)]
pub enum EdgeListError {
    /// Input holds no `[...]` block.
    #[error("No edge-list block found")]
    Empty,
    /// `[` and `]` do not pair up.
    #[error("Unbalanced brackets at position {0}")]
    UnbalancedBrackets(usize),
    /// Text between blocks other than separators.
    #[error("Unexpected text outside a block at position {0}")]
    UnexpectedText(usize),
    /// Block content is not a list of `(u, v)` / `(u, )` tuples.
    #[error("Invalid format in block {index}: \"{block}\"")]
    InvalidBlock {
        /// 1-based block number.
        index: usize,
        /// Offending block, whitespace removed.
        block: String,
    },
    /// Node id, or its block-shifted value, does not fit in 64 bits.
    #[error("Invalid node id: {0}")]
    InvalidNodeId(String),
    /// Edge from a node to itself.
    #[error("Self-loop on node {node} in block {index}")]
    SelfLoop {
        /// 1-based block number.
        index: usize,
        /// Node id as written, before offsetting.
        node: u64,
    },
    /// Internal pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex_lite::Error),
}

/// Where one block landed in the combined graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    /// Amount added to every id of this block.
    pub offset: u64,
    /// Distinct nodes of this block.
    pub nodes: usize,
    /// Edge tuples of this block.
    pub edges: usize,
}

/// Parsed edge-list input.
#[derive(Debug, Clone)]
pub struct ParsedEdgeList {
    /// Disjoint union of all blocks.
    pub graph: InMemoryGraph,
    /// One summary per block, in input order.
    pub blocks: Vec<BlockSummary>,
}

struct Patterns {
    block: Regex,
    tuple: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> Result<&'static Patterns, EdgeListError> {
    if let Some(patterns) = PATTERNS.get() {
        return Ok(patterns);
    }
    let compiled = Patterns {
        block: Regex::new(BLOCK_PATTERN)?,
        tuple: Regex::new(TUPLE_PATTERN)?,
    };
    Ok(PATTERNS.get_or_init(|| compiled))
}

/// Split whitespace-free input into top-level `[...]` blocks.
fn extract_blocks(flat: &str) -> Result<Vec<&str>, EdgeListError> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in flat.char_indices() {
        match c {
            '[' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(EdgeListError::UnbalancedBrackets(i))?;
                if depth == 0 {
                    blocks.push(&flat[start..=i]);
                }
            }
            ',' | ';' if depth == 0 => {}
            _ if depth == 0 => return Err(EdgeListError::UnexpectedText(i)),
            _ => {}
        }
    }

    if depth != 0 {
        return Err(EdgeListError::UnbalancedBrackets(start));
    }
    Ok(blocks)
}

fn parse_id(digits: &str) -> Result<u64, EdgeListError> {
    digits
        .parse()
        .map_err(|_| EdgeListError::InvalidNodeId(digits.to_string()))
}

/// Shift a block-local id into the combined graph; ids past `u64::MAX` are rejected.
fn shift_id(raw: u64, offset: u64) -> Result<NodeId, EdgeListError> {
    raw.checked_add(offset)
        .map(NodeId::new)
        .ok_or_else(|| EdgeListError::InvalidNodeId(format!("{raw}+{offset}")))
}

/// Parse edge-list text into a graph.
pub fn parse_edge_list(text: &str) -> Result<ParsedEdgeList, EdgeListError> {
    let patterns = patterns()?;
    let flat: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let blocks = extract_blocks(&flat)?;
    if blocks.is_empty() {
        return Err(EdgeListError::Empty);
    }

    let mut graph = InMemoryGraph::new();
    let mut summaries = Vec::with_capacity(blocks.len());
    let mut seen: BTreeSet<NodeId> = BTreeSet::new();

    for (i, block) in blocks.iter().enumerate() {
        let index = i + 1;
        let inner = &block[1..block.len() - 1];
        if !inner.is_empty() && !patterns.block.is_match(inner) {
            tracing::warn!(index, block = %block, "Rejected edge-list block");
            return Err(EdgeListError::InvalidBlock {
                index,
                block: block.to_string(),
            });
        }

        let offset = seen.len() as u64;
        let mut block_nodes: BTreeSet<NodeId> = BTreeSet::new();
        let mut block_edges = 0usize;

        for caps in patterns.tuple.captures_iter(inner) {
            let (Some(first), Some(second)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let raw_u = parse_id(first.as_str())?;
            let u = shift_id(raw_u, offset)?;
            block_nodes.insert(u);

            if second.as_str().is_empty() {
                graph.add_node(u);
                continue;
            }

            let raw_v = parse_id(second.as_str())?;
            let v = shift_id(raw_v, offset)?;
            let edge = UndirectedEdge::new(u, v)
                .ok_or(EdgeListError::SelfLoop { index, node: raw_u })?;
            block_nodes.insert(v);
            graph.insert_edge(edge);
            block_edges += 1;
        }

        summaries.push(BlockSummary {
            offset,
            nodes: block_nodes.len(),
            edges: block_edges,
        });
        seen.extend(block_nodes);
    }

    tracing::debug!(
        blocks = summaries.len(),
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        "Parsed edge list"
    );

    Ok(ParsedEdgeList {
        graph,
        blocks: summaries,
    })
}

/// Serialize a graph as a single edge-list block.
///
/// Edges come first in canonical order, then each isolated node as `(x, )`.
pub fn to_edge_list(graph: &InMemoryGraph) -> String {
    let mut items: Vec<String> = graph
        .edges()
        .map(|e| format!("({}, {})", e.lo(), e.hi()))
        .collect();
    items.extend(graph.isolated_nodes().map(|n| format!("({}, )", n)));

    format!("[{}]", items.join(", "))
}
