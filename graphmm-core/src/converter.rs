//! Edge list to Matrix Market orchestration.
//!
//! [`Converter`] runs the reader, the matrix builder and the writer in order.
//! Parsing and matrix construction finish before the output is touched, so a
//! malformed edge list never creates or truncates the destination file.

use std::{
    io::{BufRead, Write},
    path::Path,
};

use tracing::{Span, field, info, instrument};

use crate::{
    Result,
    graph::{Graph, GraphKind},
    market::MatrixMarketWriter,
    matrix::SparseMatrix,
    reader::{CommentPolicy, GraphReader},
};

/// Configures and constructs [`Converter`] instances.
///
/// # Examples
/// ```
/// use graphmm_core::{CommentPolicy, ConverterBuilder, GraphKind};
///
/// let converter = ConverterBuilder::new()
///     .with_kind(GraphKind::Undirected)
///     .with_comment_policy(CommentPolicy::SkipHash)
///     .build();
/// assert_eq!(converter.kind(), GraphKind::Undirected);
/// assert_eq!(converter.comment_policy(), CommentPolicy::SkipHash);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConverterBuilder {
    kind: GraphKind,
    comments: CommentPolicy,
}

impl ConverterBuilder {
    /// Creates a builder for directed graphs that rejects comment lines.
    ///
    /// # Examples
    /// ```
    /// use graphmm_core::{CommentPolicy, ConverterBuilder, GraphKind};
    ///
    /// let builder = ConverterBuilder::new();
    /// assert_eq!(builder.kind(), GraphKind::Directed);
    /// assert_eq!(builder.comment_policy(), CommentPolicy::Reject);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how edges are materialised.
    #[must_use]
    pub const fn with_kind(mut self, kind: GraphKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the configured graph kind.
    #[must_use]
    pub const fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Sets how `#` lines in the edge list are handled.
    #[must_use]
    pub const fn with_comment_policy(mut self, policy: CommentPolicy) -> Self {
        self.comments = policy;
        self
    }

    /// Returns the configured comment policy.
    #[must_use]
    pub const fn comment_policy(&self) -> CommentPolicy {
        self.comments
    }

    /// Builds the converter.
    #[must_use]
    pub const fn build(self) -> Converter {
        Converter {
            reader: GraphReader::new(self.kind).with_comment_policy(self.comments),
        }
    }
}

/// Figures describing one completed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    /// How edges were materialised.
    pub kind: GraphKind,
    /// Distinct node identifiers referenced by the edge list.
    pub nodes: usize,
    /// Edges read from the input.
    pub edges: usize,
    /// Matrix row count.
    pub rows: u64,
    /// Matrix column count.
    pub cols: u64,
    /// Entries written, repeats included.
    pub nnz: usize,
}

impl ConversionSummary {
    fn describe(graph: &Graph, matrix: &SparseMatrix) -> Self {
        Self {
            kind: graph.kind(),
            nodes: graph.node_count(),
            edges: graph.len(),
            rows: matrix.rows(),
            cols: matrix.cols(),
            nnz: matrix.nnz(),
        }
    }
}

/// Converts edge lists into Matrix Market documents.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use graphmm_core::{ConverterBuilder, GraphKind};
///
/// let converter = ConverterBuilder::new().with_kind(GraphKind::Undirected).build();
/// let mut output = Vec::new();
/// let summary = converter.convert_stream(Cursor::new("0 1\n"), &mut output)?;
/// assert_eq!(summary.nnz, 2);
/// assert_eq!(
///     String::from_utf8(output)?,
///     "%%MatrixMarket matrix coordinate real general\n2 2 2\n1 2 1.0\n2 1 1.0\n",
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Converter {
    reader: GraphReader,
}

impl Converter {
    /// Returns the graph kind applied to every input.
    #[must_use]
    pub const fn kind(&self) -> GraphKind {
        self.reader.kind()
    }

    /// Returns the comment policy applied to every input.
    #[must_use]
    pub const fn comment_policy(&self) -> CommentPolicy {
        self.reader.comment_policy()
    }

    /// Converts the edge list at `input` and replaces `output` with the
    /// resulting Matrix Market document.
    ///
    /// # Errors
    /// Returns [`crate::ConvertError::Read`] when the input is unreadable or
    /// malformed, [`crate::ConvertError::Matrix`] when the node ids cannot be
    /// dimensioned, and [`crate::ConvertError::Write`] when the output cannot
    /// be written. Only the last of these touches `output`.
    #[instrument(
        name = "converter.convert",
        err,
        skip(self),
        fields(
            input = %input.display(),
            output = %output.display(),
            kind = %self.kind(),
            nnz = field::Empty,
        ),
    )]
    pub fn convert(&self, input: &Path, output: &Path) -> Result<ConversionSummary> {
        let graph = self.reader.read_path(input)?;
        let matrix = SparseMatrix::from_graph(&graph)?;
        MatrixMarketWriter::new(&matrix).write_to_path(output)?;
        Ok(Self::finish(&graph, &matrix))
    }

    /// Converts an edge list read from `input` and writes the document to
    /// `output`.
    ///
    /// # Errors
    /// Returns the same error kinds as [`Self::convert`], with stream
    /// variants in place of path-bearing ones.
    #[instrument(
        name = "converter.convert_stream",
        err,
        skip(self, input, output),
        fields(kind = %self.kind(), nnz = field::Empty),
    )]
    pub fn convert_stream<R: BufRead, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<ConversionSummary> {
        let graph = self.reader.read_from(input)?;
        let matrix = SparseMatrix::from_graph(&graph)?;
        MatrixMarketWriter::new(&matrix).write_to(output)?;
        Ok(Self::finish(&graph, &matrix))
    }

    fn finish(graph: &Graph, matrix: &SparseMatrix) -> ConversionSummary {
        let summary = ConversionSummary::describe(graph, matrix);
        Span::current().record("nnz", summary.nnz);
        info!(
            kind = %summary.kind,
            nodes = summary.nodes,
            edges = summary.edges,
            rows = summary.rows,
            nnz = summary.nnz,
            "conversion completed"
        );
        summary
    }
}
