//! Various schemes for reporting messages during testing or after testing is done.

use crate::{
    core::CheckResult, display, github_actions, test_result::Outcome, CandidateFile, ConfigError,
    RunReport,
};
use std::fmt::{Debug, Write as _};

mod json;
mod text;
pub use json::Json;
pub use text::Text;

/// A generic way to handle the output of this crate.
pub trait StatusEmitter {
    /// Invoked right before a test file gets processed.
    fn register_test(&self, file: &CandidateFile) -> Box<dyn TestStatus>;

    /// Report the outcome of the entire test run at the end.
    fn finalize(&self, report: &RunReport);

    /// The run was stopped because of a problem with the tests themselves.
    fn aborted(&self, _error: &ConfigError) {}
}

/// Information about a specific test run.
pub trait TestStatus {
    /// A test has finished, handle the result immediately.
    fn done(&self, _outcome: &Outcome, _check: &CheckResult) {}

    /// Invoked after `done` for failed tests, or for all tests if the output was asked for.
    /// The returned guard gets dropped right afterwards.
    fn output<'a>(&'a self, check: &'a CheckResult) -> Box<dyn Debug + 'a>;

    /// The test file.
    fn file(&self) -> &CandidateFile;
}

/// Emit nothing
impl StatusEmitter for () {
    fn register_test(&self, file: &CandidateFile) -> Box<dyn TestStatus> {
        Box::new(SilentStatus { file: file.clone() })
    }

    fn finalize(&self, _report: &RunReport) {}
}

/// When you need a dummy value that doesn't actually print anything
pub struct SilentStatus {
    /// Forwarded to `TestStatus::file`
    pub file: CandidateFile,
}

impl TestStatus for SilentStatus {
    fn output<'a>(&'a self, _check: &'a CheckResult) -> Box<dyn Debug + 'a> {
        Box::new(())
    }

    fn file(&self) -> &CandidateFile {
        &self.file
    }
}

/// The annotations for a finished test, printed when they are dropped.
fn gha_errors(
    file: &CandidateFile,
    outcome: &Outcome,
    check: &CheckResult,
) -> Vec<github_actions::Error> {
    let path = display(file.path());
    let mut errors = vec![];
    match outcome {
        Outcome::Pass => {}
        Outcome::UnexpectedSuccess => {
            let mut err = github_actions::error(&path, "compilation succeeded unexpectedly");
            writeln!(err, "`{}` must fail to build", check.command).unwrap();
            errors.push(err);
        }
        Outcome::MissingExpectations(unmet) => {
            if let Some(spawn_error) = &check.spawn_error {
                let mut err = github_actions::error(&path, "could not run the checker");
                writeln!(err, "{spawn_error}").unwrap();
                errors.push(err);
            }
            for expectation in unmet {
                let mut err = github_actions::error(&path, "expected error not found")
                    .line(expectation.line());
                writeln!(err, "`{expectation}` not found in diagnostics").unwrap();
                errors.push(err);
            }
        }
    }
    errors
}

fn gha_abort_error(error: &ConfigError) -> github_actions::Error {
    let path = match error {
        ConfigError::NoExpectations { path } | ConfigError::ReadFile { path, .. } => path,
        ConfigError::NoFilesFound { dir, .. } | ConfigError::ReadDir { dir, .. } => dir,
    };
    github_actions::error(display(path), error.to_string())
}

/// Emits Github Actions Workspace commands to show the failures directly in the github diff view.
/// If the const generic `GROUP` boolean is `true`, also emit `::group` commands around
/// the checker output.
pub struct Gha<const GROUP: bool> {
    /// Show a specific name for the final summary.
    pub name: String,
}

struct GhaStatus<const GROUP: bool> {
    file: CandidateFile,
}

impl<const GROUP: bool> TestStatus for GhaStatus<GROUP> {
    fn done(&self, outcome: &Outcome, check: &CheckResult) {
        drop(gha_errors(&self.file, outcome, check));
    }

    fn output<'a>(&'a self, _check: &'a CheckResult) -> Box<dyn Debug + 'a> {
        if GROUP {
            Box::new(github_actions::group(format_args!(
                "output for {}",
                self.file.target()
            )))
        } else {
            Box::new(())
        }
    }

    fn file(&self) -> &CandidateFile {
        &self.file
    }
}

impl<const GROUP: bool> StatusEmitter for Gha<GROUP> {
    fn register_test(&self, file: &CandidateFile) -> Box<dyn TestStatus> {
        Box::new(GhaStatus::<GROUP> { file: file.clone() })
    }

    fn finalize(&self, report: &RunReport) {
        if let Some(mut file) = github_actions::summary() {
            // Failing to write the summary must not fail the run.
            let _ = write_summary(&mut file, &self.name, report);
        }
    }

    fn aborted(&self, error: &ConfigError) {
        drop(gha_abort_error(error));
    }
}

fn write_summary(
    file: &mut impl std::io::Write,
    name: &str,
    report: &RunReport,
) -> std::io::Result<()> {
    writeln!(file, "### {name}")?;
    for target in report.unexpected_success() {
        writeln!(file, "* {target}: compilation succeeded unexpectedly")?;
    }
    for (target, unmet) in report.missing_expectations() {
        writeln!(file, "* {target}: {} expected errors not found", unmet.len())?;
    }
    writeln!(file)?;
    writeln!(file, "| failed | passed |")?;
    writeln!(file, "| --- | --- |")?;
    writeln!(file, "| {} | {} |", report.failed(), report.passed().len())
}

impl<T: TestStatus, U: TestStatus> TestStatus for (T, U) {
    fn done(&self, outcome: &Outcome, check: &CheckResult) {
        self.0.done(outcome, check);
        self.1.done(outcome, check);
    }

    fn output<'a>(&'a self, check: &'a CheckResult) -> Box<dyn Debug + 'a> {
        Box::new((self.0.output(check), self.1.output(check)))
    }

    fn file(&self) -> &CandidateFile {
        let file = self.0.file();
        assert_eq!(file, self.1.file());
        file
    }
}

impl<T: StatusEmitter, U: StatusEmitter> StatusEmitter for (T, U) {
    fn register_test(&self, file: &CandidateFile) -> Box<dyn TestStatus> {
        Box::new((self.0.register_test(file), self.1.register_test(file)))
    }

    fn finalize(&self, report: &RunReport) {
        self.0.finalize(report);
        self.1.finalize(report);
    }

    fn aborted(&self, error: &ConfigError) {
        self.0.aborted(error);
        self.1.aborted(error);
    }
}

impl<T: TestStatus + ?Sized> TestStatus for Box<T> {
    fn done(&self, outcome: &Outcome, check: &CheckResult) {
        (**self).done(outcome, check);
    }

    fn output<'a>(&'a self, check: &'a CheckResult) -> Box<dyn Debug + 'a> {
        (**self).output(check)
    }

    fn file(&self) -> &CandidateFile {
        (**self).file()
    }
}

impl<T: StatusEmitter + ?Sized> StatusEmitter for Box<T> {
    fn register_test(&self, file: &CandidateFile) -> Box<dyn TestStatus> {
        (**self).register_test(file)
    }

    fn finalize(&self, report: &RunReport) {
        (**self).finalize(report)
    }

    fn aborted(&self, error: &ConfigError) {
        (**self).aborted(error)
    }
}
