use super::StatusEmitter;
use super::TestStatus;
use crate::core::CheckResult;
use crate::test_result::Outcome;
use crate::CandidateFile;
use crate::ConfigError;
use crate::RunReport;

use std::fmt::Debug;
use std::fmt::Write as _;

use bstr::ByteSlice;
use serde::Serialize;

/// Shaped like libtest's `--format=json` events, so existing tooling can read them.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Event<'a> {
    Test {
        event: &'a str,
        name: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        stdout: Option<String>,
    },
    Suite {
        event: &'a str,
        passed: usize,
        failed: usize,
        ignored: usize,
        measured: usize,
        filtered_out: usize,
        #[serde(skip_serializing_if = "no_targets")]
        unexpected_success: &'a [String],
        #[serde(skip_serializing_if = "Vec::is_empty")]
        missing_expectations: Vec<Missing<'a>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

fn no_targets(targets: &&[String]) -> bool {
    targets.is_empty()
}

#[derive(Serialize)]
struct Missing<'a> {
    name: &'a str,
    expected: Vec<&'a str>,
}

fn emit(event: &Event<'_>) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(err) => eprintln!("failed to serialize test event: {err}"),
    }
}

/// A JSON output emitter.
#[derive(Clone, Debug)]
pub struct Json;

impl StatusEmitter for Json {
    fn register_test(&self, file: &CandidateFile) -> Box<dyn TestStatus> {
        emit(&Event::Test {
            event: "started",
            name: file.target(),
            stdout: None,
        });
        Box::new(JsonStatus { file: file.clone() })
    }

    fn finalize(&self, report: &RunReport) {
        emit(&Event::Suite {
            event: if report.is_success() { "ok" } else { "failed" },
            passed: report.passed().len(),
            failed: report.failed(),
            ignored: 0,
            measured: 0,
            filtered_out: 0,
            unexpected_success: report.unexpected_success(),
            missing_expectations: report
                .missing_expectations()
                .iter()
                .map(|(name, unmet)| Missing {
                    name,
                    expected: unmet.iter().map(|e| e.as_str()).collect(),
                })
                .collect(),
            error: None,
        });
    }

    fn aborted(&self, error: &ConfigError) {
        emit(&Event::Suite {
            event: "failed",
            passed: 0,
            failed: 0,
            ignored: 0,
            measured: 0,
            filtered_out: 0,
            unexpected_success: &[],
            missing_expectations: vec![],
            error: Some(error.to_string()),
        });
    }
}

/// Information about a specific test run.
struct JsonStatus {
    file: CandidateFile,
}

impl TestStatus for JsonStatus {
    fn done(&self, outcome: &Outcome, check: &CheckResult) {
        let mut stdout = String::new();
        match outcome {
            Outcome::Pass => {}
            Outcome::UnexpectedSuccess => {
                stdout.push_str("compilation succeeded unexpectedly\n");
            }
            Outcome::MissingExpectations(unmet) => {
                stdout.push_str("expected errors not found:\n");
                for expectation in unmet {
                    let _ = writeln!(stdout, "  - {expectation}");
                }
            }
        }
        let stdout = (!outcome.is_pass()).then(|| {
            let _ = write!(
                stdout,
                "---- command\n\n{}\n\n---- stderr\n\n{}",
                check.command,
                check.stderr.to_str_lossy()
            );
            stdout
        });
        emit(&Event::Test {
            event: if outcome.is_pass() { "ok" } else { "failed" },
            name: self.file.target(),
            stdout,
        });
    }

    fn output<'a>(&'a self, _check: &'a CheckResult) -> Box<dyn Debug + 'a> {
        Box::new(())
    }

    fn file(&self) -> &CandidateFile {
        &self.file
    }
}
