//! Matrix Market serialisation.

use std::{
    fmt, fs,
    io::Write,
    path::Path,
};

use tracing::{Span, field, instrument};

use super::BANNER;
use crate::{error::WriteError, matrix::SparseMatrix};

/// Serialises a [`SparseMatrix`] as `matrix coordinate real general`.
///
/// Coordinates are written one-based in storage order. The whole document is
/// rendered in memory before anything reaches the destination.
///
/// # Examples
/// ```
/// use graphmm_core::{Edge, Graph, GraphKind, MatrixMarketWriter, SparseMatrix};
///
/// let graph = Graph::from_edges(GraphKind::Directed, vec![Edge::from((0, 0))]);
/// let matrix = SparseMatrix::from_graph(&graph)?;
/// let text = MatrixMarketWriter::new(&matrix).to_string();
/// assert_eq!(text, "%%MatrixMarket matrix coordinate real general\n1 1 1\n1 1 1.0\n");
/// # Ok::<(), graphmm_core::MatrixError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MatrixMarketWriter<'a> {
    matrix: &'a SparseMatrix,
}

impl<'a> MatrixMarketWriter<'a> {
    /// Wraps `matrix` for serialisation.
    #[must_use]
    pub const fn new(matrix: &'a SparseMatrix) -> Self {
        Self { matrix }
    }

    /// Renders the document to bytes.
    #[must_use]
    pub fn render(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Writes the rendered document to `writer` in a single call.
    ///
    /// # Errors
    /// Returns [`WriteError::Stream`] when the writer fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), WriteError> {
        writer
            .write_all(&self.render())
            .and_then(|()| writer.flush())
            .map_err(|source| WriteError::Stream { source })
    }

    /// Replaces the contents of `path` with the rendered document.
    ///
    /// # Errors
    /// Returns [`WriteError::Io`] when the file cannot be created or written.
    /// A failure part-way through may leave the file truncated.
    #[instrument(
        name = "market.write_path",
        err,
        skip(self),
        fields(path = %path.display(), bytes = field::Empty),
    )]
    pub fn write_to_path(&self, path: &Path) -> Result<(), WriteError> {
        let bytes = self.render();
        Span::current().record("bytes", bytes.len());
        fs::write(path, bytes).map_err(|source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl fmt::Display for MatrixMarketWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BANNER}")?;
        writeln!(
            f,
            "{} {} {}",
            self.matrix.rows(),
            self.matrix.cols(),
            self.matrix.nnz()
        )?;
        for entry in self.matrix.entries() {
            // Debug keeps a decimal point on integral values (`1.0`).
            writeln!(
                f,
                "{} {} {:?}",
                u128::from(entry.row()) + 1,
                u128::from(entry.col()) + 1,
                entry.value()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    use rstest::rstest;

    use crate::graph::{Edge, Graph, GraphKind};

    fn render(kind: GraphKind, pairs: &[(u64, u64)]) -> String {
        let graph = Graph::from_edges(kind, pairs.iter().copied().map(Edge::from).collect());
        let matrix = SparseMatrix::from_graph(&graph).expect("matrix must build");
        MatrixMarketWriter::new(&matrix).to_string()
    }

    #[rstest]
    #[case::directed_cycle(
        GraphKind::Directed,
        &[(0, 1), (1, 2), (2, 0)],
        "%%MatrixMarket matrix coordinate real general\n3 3 3\n1 2 1.0\n2 3 1.0\n3 1 1.0\n",
    )]
    #[case::undirected_pair(
        GraphKind::Undirected,
        &[(0, 1)],
        "%%MatrixMarket matrix coordinate real general\n2 2 2\n1 2 1.0\n2 1 1.0\n",
    )]
    #[case::self_loop(
        GraphKind::Directed,
        &[(0, 0)],
        "%%MatrixMarket matrix coordinate real general\n1 1 1\n1 1 1.0\n",
    )]
    #[case::empty(GraphKind::Directed, &[], "%%MatrixMarket matrix coordinate real general\n0 0 0\n")]
    #[case::unsorted(
        GraphKind::Directed,
        &[(2, 0), (0, 2), (1, 1)],
        "%%MatrixMarket matrix coordinate real general\n3 3 3\n3 1 1.0\n1 3 1.0\n2 2 1.0\n",
    )]
    fn renders_exact_documents(
        #[case] kind: GraphKind,
        #[case] pairs: &[(u64, u64)],
        #[case] expected: &str,
    ) {
        assert_eq!(render(kind, pairs), expected);
    }

    #[test]
    fn largest_coordinate_is_shifted_without_overflow() {
        let matrix = SparseMatrix::from_checked_parts(
            u64::MAX,
            u64::MAX,
            vec![crate::matrix::Entry::new(u64::MAX - 1, 0, 1.0)],
        );
        let text = MatrixMarketWriter::new(&matrix).to_string();
        assert!(text.ends_with(&format!("{} 1 1.0\n", u64::MAX)));
    }

    #[test]
    fn write_to_emits_rendered_bytes() {
        let text = render(GraphKind::Undirected, &[(1, 0)]);
        let graph = Graph::from_edges(GraphKind::Undirected, vec![Edge::from((1, 0))]);
        let matrix = SparseMatrix::from_graph(&graph).expect("matrix must build");
        let mut buffer = Vec::new();
        MatrixMarketWriter::new(&matrix)
            .write_to(&mut buffer)
            .expect("in-memory write must succeed");
        assert_eq!(buffer, text.into_bytes());
    }

    #[test]
    fn write_to_reports_stream_failures() {
        struct FailingWriter;

        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("boom"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let matrix = SparseMatrix::from_checked_parts(0, 0, Vec::new());
        let err = MatrixMarketWriter::new(&matrix)
            .write_to(FailingWriter)
            .expect_err("failing writer must surface an error");
        assert!(matches!(err, WriteError::Stream { .. }));
    }

    #[test]
    fn write_to_path_overwrites_existing_files() {
        let dir = tempfile::tempdir().expect("temp dir must be created");
        let path = dir.path().join("out.mm");
        fs::write(&path, "stale contents that are much longer than the new document\n")
            .expect("seed file must be written");

        let matrix = SparseMatrix::from_checked_parts(0, 0, Vec::new());
        MatrixMarketWriter::new(&matrix)
            .write_to_path(&path)
            .expect("write must succeed");
        let written = fs::read_to_string(&path).expect("output must be readable");
        assert_eq!(written, "%%MatrixMarket matrix coordinate real general\n0 0 0\n");
    }

    #[test]
    fn write_to_path_reports_unwritable_paths() {
        let dir = tempfile::tempdir().expect("temp dir must be created");
        let path = dir.path().join("missing").join("out.mm");
        let matrix = SparseMatrix::from_checked_parts(0, 0, Vec::new());
        let err = MatrixMarketWriter::new(&matrix)
            .write_to_path(&path)
            .expect_err("missing parent directory must fail");
        match err {
            WriteError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
