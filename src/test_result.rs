//! Classification of single tests and the aggregate report of a run.

use crate::core::{unmet_expectations, CheckResult};
use crate::parser::Expectation;
use std::process::ExitCode;

/// The result of checking a single test file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The checker failed and all expectations were found in its output.
    Pass,
    /// The checker succeeded, even though the file must not build.
    UnexpectedSuccess,
    /// The checker failed, but these expectations were not in its output.
    MissingExpectations(Vec<Expectation>),
}

impl Outcome {
    /// Decide the outcome of a test from the checker's result.
    pub fn classify(expectations: &[Expectation], check: &CheckResult) -> Self {
        if check.success {
            return Outcome::UnexpectedSuccess;
        }
        let unmet = unmet_expectations(expectations, check.diagnostics());
        if unmet.is_empty() {
            Outcome::Pass
        } else {
            Outcome::MissingExpectations(unmet)
        }
    }

    /// Whether the test passed.
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

/// Collects outcomes while tests are running.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    report: RunReport,
}

impl ReportBuilder {
    /// Record the outcome for `target`.
    pub fn record(&mut self, target: &str, outcome: &Outcome) {
        let report = &mut self.report;
        match outcome {
            Outcome::Pass => report.passed.push(target.to_owned()),
            Outcome::UnexpectedSuccess => report.unexpected_success.push(target.to_owned()),
            Outcome::MissingExpectations(unmet) => {
                report
                    .missing_expectations
                    .push((target.to_owned(), unmet.clone()));
            }
        }
    }

    /// No more tests will be run.
    pub fn finish(self) -> RunReport {
        self.report
    }
}

/// The outcome of all tests of a run.
#[derive(Debug, Default, Clone)]
pub struct RunReport {
    passed: Vec<String>,
    unexpected_success: Vec<String>,
    missing_expectations: Vec<(String, Vec<Expectation>)>,
}

impl RunReport {
    /// Targets that failed to build with all expected diagnostics.
    pub fn passed(&self) -> &[String] {
        &self.passed
    }

    /// Targets that built even though they should not have.
    pub fn unexpected_success(&self) -> &[String] {
        &self.unexpected_success
    }

    /// Targets that failed to build, but lacked some expected diagnostics,
    /// in the order they were run.
    pub fn missing_expectations(&self) -> &[(String, Vec<Expectation>)] {
        &self.missing_expectations
    }

    /// Number of targets that did not pass.
    pub fn failed(&self) -> usize {
        self.unexpected_success.len() + self.missing_expectations.len()
    }

    /// Whether every test passed.
    pub fn is_success(&self) -> bool {
        self.unexpected_success.is_empty() && self.missing_expectations.is_empty()
    }

    /// `0` if every test passed, `1` otherwise.
    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}
