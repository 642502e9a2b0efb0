//! Coordinate-format sparse matrices built from graphs.

use tracing::{debug, instrument};

use crate::{
    error::MatrixError,
    graph::{Edge, Graph, GraphKind},
};

/// Value stored for every edge; edge lists carry no weights.
pub const EDGE_WEIGHT: f64 = 1.0;

/// A single `(row, col, value)` triple with zero-based coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    row: u64,
    col: u64,
    value: f64,
}

impl Entry {
    /// Creates an entry at zero-based `(row, col)`.
    #[must_use]
    pub const fn new(row: u64, col: u64, value: f64) -> Self {
        Self { row, col, value }
    }

    /// Returns the zero-based row.
    #[must_use]
    pub const fn row(self) -> u64 {
        self.row
    }

    /// Returns the zero-based column.
    #[must_use]
    pub const fn col(self) -> u64 {
        self.col
    }

    /// Returns the stored value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.value
    }
}

impl From<Edge> for Entry {
    /// Places the edge at `(source, target)` with [`EDGE_WEIGHT`].
    fn from(edge: Edge) -> Self {
        Self::new(edge.source().get(), edge.target().get(), EDGE_WEIGHT)
    }
}

/// Square coordinate-format matrix over the node index space of a graph.
///
/// Entries keep edge input order and are never merged: a repeated edge, or an
/// undirected edge whose reverse is also listed, yields repeated coordinates.
/// Matrix Market consumers are expected to sum repeated coordinates.
///
/// # Examples
/// ```
/// use graphmm_core::{Edge, Entry, Graph, GraphKind, SparseMatrix};
///
/// let graph = Graph::from_edges(GraphKind::Undirected, vec![Edge::from((0, 1))]);
/// let matrix = SparseMatrix::from_graph(&graph)?;
/// assert_eq!((matrix.rows(), matrix.cols(), matrix.nnz()), (2, 2, 2));
/// assert_eq!(
///     matrix.entries(),
///     &[Entry::new(0, 1, 1.0), Entry::new(1, 0, 1.0)],
/// );
/// # Ok::<(), graphmm_core::MatrixError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    rows: u64,
    cols: u64,
    entries: Vec<Entry>,
}

impl SparseMatrix {
    /// Materialises the adjacency matrix of `graph`.
    ///
    /// The matrix is `(max_id + 1) x (max_id + 1)`, or `0 x 0` for a graph
    /// without edges. Directed graphs contribute one entry per edge;
    /// undirected graphs contribute the edge followed by its reverse, self
    /// loops included.
    ///
    /// # Errors
    /// Returns [`MatrixError::DimensionOverflow`] when the largest node id is
    /// `u64::MAX`.
    #[instrument(
        name = "matrix.from_graph",
        err,
        skip(graph),
        fields(kind = %graph.kind(), edges = graph.len()),
    )]
    pub fn from_graph(graph: &Graph) -> Result<Self, MatrixError> {
        let dimension = match graph.max_node_id() {
            Some(max_id) => max_id
                .get()
                .checked_add(1)
                .ok_or(MatrixError::DimensionOverflow {
                    max_id: max_id.get(),
                })?,
            None => 0,
        };

        let entries: Vec<Entry> = match graph.kind() {
            GraphKind::Directed => graph
                .edges()
                .iter()
                .map(|&edge| Entry::from(edge))
                .collect(),
            GraphKind::Undirected => graph
                .edges()
                .iter()
                .flat_map(|&edge| [Entry::from(edge), Entry::from(edge.reversed())])
                .collect(),
        };

        debug!(dimension, nnz = entries.len(), "sparse matrix built");
        Ok(Self {
            rows: dimension,
            cols: dimension,
            entries,
        })
    }

    /// Assembles a matrix whose entries the caller has bounds-checked.
    pub(crate) const fn from_checked_parts(rows: u64, cols: u64, entries: Vec<Entry>) -> Self {
        Self {
            rows,
            cols,
            entries,
        }
    }

    /// Returns the row count.
    #[must_use]
    pub const fn rows(&self) -> u64 {
        self.rows
    }

    /// Returns the column count.
    #[must_use]
    pub const fn cols(&self) -> u64 {
        self.cols
    }

    /// Returns the number of stored entries, repeats included.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entries in storage order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl TryFrom<&Graph> for SparseMatrix {
    type Error = MatrixError;

    fn try_from(graph: &Graph) -> Result<Self, Self::Error> {
        Self::from_graph(graph)
    }
}
