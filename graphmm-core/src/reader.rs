//! Edge-list parsing.
//!
//! An edge list holds one `source target` pair of non-negative integers per
//! line. Blank lines are ignored wherever they appear; anything else that is
//! not exactly two integer fields rejects the whole input.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{Span, field, instrument};

use crate::{
    error::{FormatReason, ReadError},
    graph::{Edge, Graph, GraphKind, NodeId},
};

/// Controls how lines starting with `#` are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentPolicy {
    /// `#` lines are malformed like any other non-edge line.
    #[default]
    Reject,
    /// Lines whose first non-blank character is `#` are skipped.
    SkipHash,
}

/// Parses edge lists into [`Graph`] values of a fixed kind.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use graphmm_core::{Edge, GraphKind, GraphReader};
///
/// let reader = GraphReader::new(GraphKind::Directed);
/// let graph = reader.read_from(Cursor::new("0 1\n1 2\n\n"))?;
/// assert_eq!(graph.edges(), &[Edge::from((0, 1)), Edge::from((1, 2))]);
/// # Ok::<(), graphmm_core::ReadError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphReader {
    kind: GraphKind,
    comments: CommentPolicy,
}

impl GraphReader {
    /// Creates a reader producing graphs of `kind` that rejects comment lines.
    #[must_use]
    pub const fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            comments: CommentPolicy::Reject,
        }
    }

    /// Overrides how `#` lines are handled.
    #[must_use]
    pub const fn with_comment_policy(mut self, policy: CommentPolicy) -> Self {
        self.comments = policy;
        self
    }

    /// Returns the kind assigned to parsed graphs.
    #[must_use]
    pub const fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Returns the configured comment policy.
    #[must_use]
    pub const fn comment_policy(&self) -> CommentPolicy {
        self.comments
    }

    /// Reads the edge list stored at `path`.
    ///
    /// # Errors
    /// Returns [`ReadError::Io`] when the file cannot be opened or read and
    /// [`ReadError::Format`] for the first malformed line.
    #[instrument(
        name = "graph.read_path",
        err,
        skip(self),
        fields(path = %path.display(), kind = %self.kind),
    )]
    pub fn read_path(&self, path: &Path) -> Result<Graph, ReadError> {
        let file = File::open(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_from(BufReader::new(file)).map_err(|err| match err {
            ReadError::Stream { source } => ReadError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Reads an edge list from any buffered reader.
    ///
    /// # Errors
    /// Returns [`ReadError::Stream`] when the reader fails (including on
    /// invalid UTF-8) and [`ReadError::Format`] for the first malformed line.
    #[instrument(
        name = "graph.read",
        err,
        skip(self, reader),
        fields(kind = %self.kind, edges = field::Empty),
    )]
    pub fn read_from<R: BufRead>(&self, reader: R) -> Result<Graph, ReadError> {
        let mut graph = Graph::new(self.kind);
        for (line, raw) in (1..).zip(reader.lines()) {
            let content = raw.map_err(|source| ReadError::Stream { source })?;
            if let Some(edge) = self.parse_line(line, &content)? {
                graph.push(edge);
            }
        }
        Span::current().record("edges", graph.len());
        Ok(graph)
    }

    fn parse_line(&self, line: usize, content: &str) -> Result<Option<Edge>, ReadError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if self.comments == CommentPolicy::SkipHash && trimmed.starts_with('#') {
            return Ok(None);
        }

        let reject = |reason| ReadError::Format {
            line,
            content: content.to_owned(),
            reason,
        };
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        let [source, target] = fields.as_slice() else {
            return Err(reject(FormatReason::TokenCount {
                found: fields.len(),
            }));
        };
        let source = parse_node(source).map_err(reject)?;
        let target = parse_node(target).map_err(reject)?;
        Ok(Some(Edge::new(source, target)))
    }
}

fn parse_node(token: &str) -> Result<NodeId, FormatReason> {
    token
        .parse::<u64>()
        .map(NodeId::new)
        .map_err(|_| FormatReason::InvalidNodeId {
            token: token.to_owned(),
        })
}
