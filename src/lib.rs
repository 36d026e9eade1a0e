#![deny(missing_docs)]

//! A crate to check that source files fail to build, with the diagnostics
//! they declare in `EXPECT:` comments.
//!
//! Every `.rs` file in the test directory is a separate build target. Each file
//! must contain at least one line with an `EXPECT:` marker; the rest of that line
//! is a substring that has to show up in the checker's stderr.
//!
//! ```text
//! //! EXPECT: error[E0597]: `json_string` does not live long enough
//! ```

use std::path::Path;

pub use clap;
pub use color_eyre;

mod cmd;
mod config;
pub mod core;
mod discover;
mod error;
pub mod github_actions;
pub mod parser;
pub mod status_emitter;
pub mod test_result;

pub use cmd::*;
pub use config::*;
pub use discover::*;
pub use error::*;
pub use test_result::{Outcome, RunReport};

use crate::core::check_file;
use parser::Expectations;
use status_emitter::StatusEmitter;
use test_result::ReportBuilder;

/// Run all tests as described in the config argument, reporting
/// human readable output on stdout.
pub fn run_tests(config: Config) -> Result<RunReport, ConfigError> {
    run_tests_generic(config, |_| true, status_emitter::Text::verbose())
}

/// A version of `run_tests` that allows more fine-grained control over running tests.
///
/// Only files for which `file_filter` returns `true` are run; filtering out every
/// file is an error just like an empty test directory. Problems with the test
/// files themselves stop the run and are returned as `Err`, while failing tests are
/// collected in the returned report.
pub fn run_tests_generic(
    config: Config,
    file_filter: impl Fn(&CandidateFile) -> bool,
    status_emitter: impl StatusEmitter,
) -> Result<RunReport, ConfigError> {
    let result = run_all(&config, file_filter, &status_emitter);
    match &result {
        Ok(report) => status_emitter.finalize(report),
        Err(err) => status_emitter.aborted(err),
    }
    result
}

fn run_all(
    config: &Config,
    file_filter: impl Fn(&CandidateFile) -> bool,
    status_emitter: &impl StatusEmitter,
) -> Result<RunReport, ConfigError> {
    let files = discover(&config.root_dir, &config.extension)?;
    // Every file must be annotated before the first (potentially slow) check starts.
    let tests = files
        .into_iter()
        .filter(|file| file_filter(file))
        .map(|file| {
            let expectations = Expectations::parse_file(file.path())?;
            Ok((file, expectations))
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;
    if tests.is_empty() {
        return Err(ConfigError::NoFilesFound {
            dir: config.root_dir.clone(),
            extension: config.extension.clone(),
        });
    }

    let mut report = ReportBuilder::default();
    for (file, expectations) in &tests {
        let status = status_emitter.register_test(file);
        let check = check_file(config, file);
        let outcome = Outcome::classify(expectations, &check);

        status.done(&outcome, &check);
        if config.show_output || !outcome.is_pass() {
            let _guard = status.output(&check);
        }
        report.record(file.target(), &outcome);
    }
    Ok(report.finish())
}

/// Format a path for user output, always using forward slashes.
pub fn display(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
