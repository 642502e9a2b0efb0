//! Argument parsing and command execution for the graphmm CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use graphmm_core::{CommentPolicy, ConversionSummary, ConvertError, ConverterBuilder, GraphKind};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "graphmm",
    about = "Convert an edge list into a Matrix Market coordinate file."
)]
pub struct Cli {
    /// Edge-list file with one `source target` pair per line.
    pub input: PathBuf,

    /// Destination for the Matrix Market document (overwritten).
    pub output: PathBuf,

    /// How edges are materialised into matrix entries.
    #[arg(long, value_enum, default_value_t = KindArg::Directed)]
    pub kind: KindArg,

    /// Ignore lines starting with `#` instead of rejecting them.
    #[arg(long)]
    pub skip_comments: bool,
}

/// Graph kinds accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Emit one entry per edge.
    Directed,
    /// Emit each edge in both directions.
    Undirected,
}

impl From<KindArg> for GraphKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Directed => Self::Directed,
            KindArg::Undirected => Self::Undirected,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The conversion pipeline failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Edge-list path that was converted.
    pub input: PathBuf,
    /// Matrix Market path that was written.
    pub output: PathBuf,
    /// Figures reported by the converter.
    pub conversion: ConversionSummary,
}

/// Executes the conversion described by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading, building or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use graphmm_cli::cli::{Cli, KindArg, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let input = dir.path().join("edges.txt");
/// std::fs::write(&input, "0 1\n1 2\n2 0\n")?;
/// let cli = Cli {
///     input,
///     output: dir.path().join("edges.mm"),
///     kind: KindArg::Directed,
///     skip_comments: false,
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.conversion.nnz, 3);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(kind = field::Empty, skip_comments = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let Cli {
        input,
        output,
        kind,
        skip_comments,
    } = cli;
    let kind = GraphKind::from(kind);
    let span = Span::current();
    span.record("kind", field::display(kind));
    span.record("skip_comments", skip_comments);

    let converter = ConverterBuilder::new()
        .with_kind(kind)
        .with_comment_policy(comment_policy(skip_comments))
        .build();
    let conversion = converter.convert(&input, &output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        nnz = conversion.nnz,
        "command completed"
    );
    Ok(ExecutionSummary {
        input,
        output,
        conversion,
    })
}

pub(super) const fn comment_policy(skip_comments: bool) -> CommentPolicy {
    if skip_comments {
        CommentPolicy::SkipHash
    } else {
        CommentPolicy::Reject
    }
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use graphmm_cli::cli::{ExecutionSummary, render_summary};
/// # use graphmm_core::{ConversionSummary, GraphKind};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     input: "edges.txt".into(),
///     output: "edges.mm".into(),
///     conversion: ConversionSummary {
///         kind: GraphKind::Directed,
///         nodes: 3,
///         edges: 3,
///         rows: 3,
///         cols: 3,
///         nnz: 3,
///     },
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.starts_with("input: edges.txt\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let conversion = &summary.conversion;
    writeln!(writer, "input: {}", summary.input.display())?;
    writeln!(writer, "output: {}", summary.output.display())?;
    writeln!(writer, "kind: {}", conversion.kind)?;
    writeln!(writer, "nodes: {}", conversion.nodes)?;
    writeln!(writer, "edges: {}", conversion.edges)?;
    writeln!(writer, "dimensions: {}x{}", conversion.rows, conversion.cols)?;
    writeln!(writer, "entries: {}", conversion.nnz)?;
    Ok(())
}
