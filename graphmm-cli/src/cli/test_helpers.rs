//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build temporary edge lists and assert error handling
//! behaviour. These helpers keep the test cases concise and consistent.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use graphmm_core::GraphKind;
use tempfile::TempDir;

use super::{Cli, CliError, KindArg, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn cli_for(input: PathBuf, output: PathBuf, kind: GraphKind) -> Cli {
    let kind = match kind {
        GraphKind::Directed => KindArg::Directed,
        GraphKind::Undirected => KindArg::Undirected,
    };
    Cli {
        input,
        output,
        kind,
        skip_comments: false,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
