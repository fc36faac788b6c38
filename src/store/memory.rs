//! In-memory graph store.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{NodeId, UndirectedEdge};
use super::GraphStore;

/// Error type for in-memory graph construction and queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Node not present in the graph.
    #[error("Node not found: {0}")]
    UnknownNode(NodeId),
    /// Edge from a node to itself.
    #[error("Self-loop on node {0} is not allowed")]
    SelfLoop(NodeId),
}

/// In-memory undirected graph.
///
/// Uses BTreeMap/BTreeSet for deterministic iteration order. Adding an edge
/// that already exists is a no-op, so multi-edges collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryGraph {
    /// Node -> neighbors.
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
    /// All edges, canonical.
    edges: BTreeSet<UndirectedEdge>,
}

impl InMemoryGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from raw node and edge ids.
    ///
    /// Edge endpoints are added as nodes implicitly.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = u64>,
        edges: impl IntoIterator<Item = (u64, u64)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for id in nodes {
            graph.add_node(NodeId::new(id));
        }
        for (u, v) in edges {
            graph.add_edge(NodeId::new(u), NodeId::new(v))?;
        }
        Ok(graph)
    }

    /// Add a node. Adding an existing node is a no-op.
    pub fn add_node(&mut self, id: NodeId) {
        self.adjacency.entry(id).or_default();
    }

    /// Add an undirected edge, creating missing endpoints.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<(), GraphError> {
        let edge = UndirectedEdge::new(u, v).ok_or(GraphError::SelfLoop(u))?;
        self.insert_edge(edge);
        Ok(())
    }

    /// Add an already-canonical edge, creating missing endpoints.
    pub fn insert_edge(&mut self, edge: UndirectedEdge) {
        self.adjacency.entry(edge.lo()).or_default().insert(edge.hi());
        self.adjacency.entry(edge.hi()).or_default().insert(edge.lo());
        self.edges.insert(edge);
    }

    /// Get number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Get number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Whether the node exists.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Iterate node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Iterate edges in canonical order.
    pub fn edges(&self) -> impl Iterator<Item = UndirectedEdge> + '_ {
        self.edges.iter().copied()
    }

    /// Nodes with no incident edge, ascending.
    pub fn isolated_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency
            .iter()
            .filter(|(_, neighbors)| neighbors.is_empty())
            .map(|(id, _)| *id)
    }

    /// Degree of every node.
    pub fn degrees(&self) -> BTreeMap<NodeId, usize> {
        self.adjacency
            .iter()
            .map(|(id, neighbors)| (*id, neighbors.len()))
            .collect()
    }
}

impl GraphStore for InMemoryGraph {
    type Error = GraphError;

    fn all_node_ids(&self) -> Result<Vec<NodeId>, Self::Error> {
        Ok(self.adjacency.keys().copied().collect())
    }

    fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, Self::Error> {
        self.adjacency
            .get(&id)
            .map(|set| set.iter().copied().collect())
            .ok_or(GraphError::UnknownNode(id))
    }

    fn is_adjacent(&self, u: NodeId, v: NodeId) -> Result<bool, Self::Error> {
        let neighbors = self.adjacency.get(&u).ok_or(GraphError::UnknownNode(u))?;
        if !self.adjacency.contains_key(&v) {
            return Err(GraphError::UnknownNode(v));
        }
        Ok(neighbors.contains(&v))
    }

    fn all_edges(&self) -> Result<Vec<UndirectedEdge>, Self::Error> {
        Ok(self.edges.iter().copied().collect())
    }
}
