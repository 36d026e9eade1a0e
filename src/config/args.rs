//! Command line argument processing of the `expect-fail` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Check that every source file in a directory fails to build with the
/// diagnostics named by its `EXPECT:` lines.
#[derive(Debug, Default, Parser)]
#[command(name = "expect-fail", version)]
pub struct Args {
    /// The directory containing the test files.
    /// Defaults to the directory of the `expect-fail` executable.
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Print the checker output of all tests, not just the failing ones.
    #[arg(long)]
    pub show_output: bool,

    /// Only print failures and the summary, same as `--format=terse`.
    #[arg(long, short)]
    pub quiet: bool,

    /// The output format.
    #[arg(long, value_enum, default_value_t)]
    pub format: Format,
}

/// Possible choices for styling the output.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Print one line per test, the output of failed tests and a summary.
    #[default]
    Pretty,
    /// Only print the status of each test, failures and a summary.
    Terse,
    /// One JSON object per line, like libtest's `--format=json`.
    Json,
}

impl Args {
    /// The format to print in, taking `--quiet` into account.
    pub fn output_format(&self) -> Format {
        match self.format {
            Format::Pretty if self.quiet => Format::Terse,
            format => format,
        }
    }
}
