//! Unit tests for argument parsing and command execution.

use super::commands::comment_policy;
use super::test_helpers::{cli_for, create_text_file, run_cli_expecting_error, temp_dir};
use super::{Cli, CliError, ExecutionSummary, KindArg, render_summary, run_cli};

use std::fs;

use clap::Parser;
use clap::error::ErrorKind;
use graphmm_core::{
    CommentPolicy, ConversionSummary, ConvertError, GraphKind, ReadError, WriteError,
};
use graphmm_test_support::tracing::CaptureLayer;
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const BANNER: &str = "%%MatrixMarket matrix coordinate real general";

#[rstest]
#[case::directed_cycle(
    GraphKind::Directed,
    "0 1\n1 2\n2 0\n",
    "3 3 3\n1 2 1.0\n2 3 1.0\n3 1 1.0\n"
)]
#[case::undirected_edge(GraphKind::Undirected, "0 1\n", "2 2 2\n1 2 1.0\n2 1 1.0\n")]
#[case::directed_self_loop(GraphKind::Directed, "0 0\n", "1 1 1\n1 1 1.0\n")]
#[case::empty_input(GraphKind::Directed, "", "0 0 0\n")]
fn run_writes_matrix_market_file(
    #[case] kind: GraphKind,
    #[case] edges: &str,
    #[case] body: &str,
) -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "edges.txt", edges)?;
    let output = dir.path().join("edges.mm");
    run_cli(cli_for(input, output.clone(), kind))?;
    assert_eq!(fs::read_to_string(&output)?, format!("{BANNER}\n{body}"));
    Ok(())
}

#[rstest]
fn run_rejects_malformed_lines_without_creating_output() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "edges.txt", "0 1\nabc\n")?;
    let output = dir.path().join("edges.mm");
    let err = run_cli_expecting_error(
        cli_for(input, output.clone(), GraphKind::Directed),
        "malformed input must fail",
    );
    assert!(matches!(
        err,
        CliError::Convert(ConvertError::Read(ReadError::Format { line: 2, .. }))
    ));
    assert!(!output.exists());
    Ok(())
}

#[rstest]
fn run_leaves_existing_output_untouched_on_parse_failure() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "edges.txt", "0 1\n1 x\n")?;
    let output = create_text_file(&dir, "edges.mm", "previous run\n")?;
    run_cli_expecting_error(
        cli_for(input, output.clone(), GraphKind::Undirected),
        "malformed input must fail",
    );
    assert_eq!(fs::read_to_string(&output)?, "previous run\n");
    Ok(())
}

#[rstest]
fn run_reports_missing_input() {
    let dir = temp_dir();
    let input = dir.path().join("missing.txt");
    let err = run_cli_expecting_error(
        cli_for(input.clone(), dir.path().join("out.mm"), GraphKind::Directed),
        "missing input must fail",
    );
    match err {
        CliError::Convert(ConvertError::Read(ReadError::Io { path, .. })) => {
            assert_eq!(path, input);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn run_reports_unwritable_output() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "edges.txt", "0 1\n")?;
    let output = dir.path().join("no-such-dir").join("edges.mm");
    let err = run_cli_expecting_error(
        cli_for(input, output, GraphKind::Directed),
        "unwritable output must fail",
    );
    assert!(matches!(
        err,
        CliError::Convert(ConvertError::Write(WriteError::Io { .. }))
    ));
    Ok(())
}

#[rstest]
fn run_is_deterministic() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "edges.txt", "5 2\n2 5\n0 0\n3 1\n")?;
    let first = dir.path().join("first.mm");
    let second = dir.path().join("second.mm");
    run_cli(cli_for(input.clone(), first.clone(), GraphKind::Undirected))?;
    run_cli(cli_for(input, second.clone(), GraphKind::Undirected))?;
    assert_eq!(fs::read(first)?, fs::read(second)?);
    Ok(())
}

#[rstest]
fn skip_comments_accepts_snap_headers() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(
        &dir,
        "web.txt",
        "# Directed graph (each unordered pair of nodes is saved once)\n# FromNodeId\tToNodeId\n0\t1\n",
    )?;
    let output = dir.path().join("web.mm");
    let mut cli = cli_for(input, output.clone(), GraphKind::Directed);
    cli.skip_comments = true;
    let summary = run_cli(cli)?;
    assert_eq!(summary.conversion.edges, 1);
    assert_eq!(
        fs::read_to_string(output)?,
        format!("{BANNER}\n2 2 1\n1 2 1.0\n")
    );
    Ok(())
}

#[rstest]
#[case(false, CommentPolicy::Reject)]
#[case(true, CommentPolicy::SkipHash)]
fn skip_comments_selects_policy(#[case] flag: bool, #[case] expected: CommentPolicy) {
    assert_eq!(comment_policy(flag), expected);
}

#[rstest]
#[case::defaults(&["graphmm", "in.txt", "out.mm"], KindArg::Directed, false)]
#[case::undirected(&["graphmm", "in.txt", "out.mm", "--kind", "undirected"], KindArg::Undirected, false)]
#[case::comments(&["graphmm", "--skip-comments", "in.txt", "out.mm"], KindArg::Directed, true)]
fn clap_parses_positionals_and_options(
    #[case] args: &[&str],
    #[case] kind: KindArg,
    #[case] skip_comments: bool,
) -> TestResult {
    let cli = Cli::try_parse_from(args)?;
    assert_eq!(cli.input.to_str(), Some("in.txt"));
    assert_eq!(cli.output.to_str(), Some("out.mm"));
    assert_eq!(cli.kind, kind);
    assert_eq!(cli.skip_comments, skip_comments);
    Ok(())
}

#[rstest]
#[case::no_arguments(&["graphmm"])]
#[case::one_argument(&["graphmm", "in.txt"])]
#[case::three_arguments(&["graphmm", "in.txt", "out.mm", "extra"])]
fn clap_rejects_wrong_arity(#[case] args: &[&str]) {
    let err = Cli::try_parse_from(args).expect_err("wrong arity must be rejected");
    assert!(matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument
    ));
    assert!(err.render().to_string().contains("Usage:"));
}

#[rstest]
fn clap_rejects_unknown_kind() {
    let result = Cli::try_parse_from(["graphmm", "in.txt", "out.mm", "--kind", "bipartite"]);
    assert!(result.is_err());
}

#[rstest]
fn render_summary_outputs_figures() -> TestResult {
    let summary = ExecutionSummary {
        input: "edges.txt".into(),
        output: "edges.mm".into(),
        conversion: ConversionSummary {
            kind: GraphKind::Undirected,
            nodes: 2,
            edges: 1,
            rows: 2,
            cols: 2,
            nnz: 2,
        },
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    assert_eq!(
        String::from_utf8(buffer)?,
        "input: edges.txt\noutput: edges.mm\nkind: undirected\nnodes: 2\nedges: 1\ndimensions: 2x2\nentries: 2\n"
    );
    Ok(())
}

#[rstest]
fn run_records_tracing_spans() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "lines.txt", "0 1\n1 0\n")?;
    let output = dir.path().join("lines.mm");
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let summary = tracing::subscriber::with_default(subscriber, || {
        run_cli(cli_for(input, output, GraphKind::Undirected))
    })?;
    assert_eq!(summary.conversion.nnz, 4);

    let spans = layer.spans();
    let run_span = spans
        .iter()
        .find(|span| span.name == "cli.run")
        .expect("cli.run span must exist");
    assert_eq!(run_span.fields.get("kind"), Some(&"undirected".to_owned()));
    assert_eq!(
        run_span.fields.get("skip_comments"),
        Some(&"false".to_owned())
    );

    let convert_span = spans
        .iter()
        .find(|span| span.name == "converter.convert")
        .expect("converter.convert span must exist");
    assert!(
        convert_span
            .fields
            .get("input")
            .is_some_and(|value| value.ends_with("lines.txt"))
    );

    let write_span = spans
        .iter()
        .find(|span| span.name == "market.write_path")
        .expect("market.write_path span must exist");
    assert!(
        write_span
            .fields
            .get("path")
            .is_some_and(|value| value.ends_with("lines.mm"))
    );

    assert!(layer.events().iter().any(|event| {
        event.level == Level::INFO
            && event.message() == Some("command completed")
            && event.fields.get("nnz").is_some_and(|value| value == "4")
    }));
    Ok(())
}

#[rstest]
fn failed_read_is_recorded_as_error_event() -> TestResult {
    let dir = temp_dir();
    let output = dir.path().join("out.mm");
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let result = tracing::subscriber::with_default(subscriber, || {
        run_cli(cli_for(
            dir.path().join("missing.txt"),
            output,
            GraphKind::Directed,
        ))
    });
    assert!(result.is_err());

    let spans = layer.spans();
    let read_span = spans
        .iter()
        .find(|span| span.name == "graph.read_path")
        .expect("graph.read_path span must exist");
    assert!(
        read_span
            .fields
            .get("path")
            .is_some_and(|value| value.ends_with("missing.txt"))
    );
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == Level::ERROR)
    );
    Ok(())
}
