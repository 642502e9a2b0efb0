//! Command-line interface for the graphmm converter.
//!
//! The CLI takes an edge-list path and a Matrix Market output path, converts
//! one into the other, and reports what was written.

mod commands;

pub use commands::{Cli, CliError, ExecutionSummary, KindArg, render_summary, run_cli};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
