//! `graphmm` binary.
//!
//! Converts `<INPUT>` into a Matrix Market file at `<OUTPUT>` and prints the
//! conversion figures on stdout. A failed conversion is logged with its
//! stable error codes and exits with status 1. A bad command line never
//! reaches the converter: clap prints usage and exits with status 2.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use graphmm_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Converts the files named on the command line, then writes the summary
/// table to stdout.
fn convert_and_report() -> Result<()> {
    let summary = run_cli(Cli::parse()).context("failed to convert edge list")?;
    let mut stdout = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut stdout).context("failed to print conversion summary")?;
    stdout.flush().context("failed to flush stdout")
}

/// Extracts the pipeline code and the stage code carried by a conversion
/// failure.
fn failure_codes(err: &anyhow::Error) -> Option<(&'static str, &'static str)> {
    match err.downcast_ref::<CliError>()? {
        CliError::Convert(convert) => Some((convert.code().as_str(), convert.stage_code())),
    }
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    let Err(err) = convert_and_report() else {
        return ExitCode::SUCCESS;
    };
    let codes = failure_codes(&err);
    error!(
        error = %format!("{err:#}"),
        code = codes.map(|(code, _)| field::display(code)),
        stage_code = codes.map(|(_, stage)| field::display(stage)),
        "conversion failed"
    );
    ExitCode::FAILURE
}

#[expect(
    clippy::print_stderr,
    reason = "No subscriber exists to carry this diagnostic"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("graphmm: cannot set up logging: {err}");
}
