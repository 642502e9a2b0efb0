//! In-memory graph model produced by the edge-list reader.

use std::{collections::HashSet, fmt};

/// Identifier of a graph node.
///
/// # Examples
/// ```
/// use graphmm_core::NodeId;
///
/// let id = NodeId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a node identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Selects how edges are materialised into matrix entries.
///
/// The kind is always chosen by the caller; it is never inferred from the
/// input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GraphKind {
    /// Each edge contributes one `(source, target)` entry.
    #[default]
    Directed,
    /// Each edge contributes `(source, target)` followed by `(target, source)`.
    Undirected,
}

impl GraphKind {
    /// Returns the lowercase label used in logs and summaries.
    ///
    /// # Examples
    /// ```
    /// use graphmm_core::GraphKind;
    ///
    /// assert_eq!(GraphKind::Undirected.as_str(), "undirected");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unweighted edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
}

impl Edge {
    /// Creates an edge from `source` to `target`.
    #[must_use]
    pub const fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    /// Returns the node the edge leaves.
    #[must_use]
    pub const fn source(self) -> NodeId {
        self.source
    }

    /// Returns the node the edge enters.
    #[must_use]
    pub const fn target(self) -> NodeId {
        self.target
    }

    /// Returns the edge with its endpoints swapped.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(self.target, self.source)
    }
}

impl From<(u64, u64)> for Edge {
    fn from((source, target): (u64, u64)) -> Self {
        Self::new(NodeId::new(source), NodeId::new(target))
    }
}

/// A graph held as its edges in input order.
///
/// Self-loops and repeated edges are kept as given.
///
/// # Examples
/// ```
/// use graphmm_core::{Edge, Graph, GraphKind, NodeId};
///
/// let graph = Graph::from_edges(
///     GraphKind::Directed,
///     vec![Edge::from((0, 3)), Edge::from((3, 3))],
/// );
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.max_node_id(), Some(NodeId::new(3)));
/// assert_eq!(graph.node_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    kind: GraphKind,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates an edge-free graph of the given kind.
    #[must_use]
    pub const fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            edges: Vec::new(),
        }
    }

    /// Creates a graph from edges in the order supplied.
    #[must_use]
    pub const fn from_edges(kind: GraphKind, edges: Vec<Edge>) -> Self {
        Self { kind, edges }
    }

    /// Appends an edge.
    pub fn push(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Returns the graph kind.
    #[must_use]
    pub const fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Returns the edges in input order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the graph has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the largest node identifier referenced by any edge.
    #[must_use]
    pub fn max_node_id(&self) -> Option<NodeId> {
        self.edges
            .iter()
            .map(|edge| edge.source.max(edge.target))
            .max()
    }

    /// Counts the distinct node identifiers referenced by the edges.
    ///
    /// Identifiers inside `[0, max_node_id]` that no edge mentions are not
    /// counted, even though they still occupy a matrix row and column.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.edges
            .iter()
            .flat_map(|edge| [edge.source, edge.target])
            .collect::<HashSet<_>>()
            .len()
    }
}
