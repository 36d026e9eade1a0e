use super::StatusEmitter;
use super::TestStatus;
use crate::core::CheckResult;
use crate::test_result::Outcome;
use crate::CandidateFile;
use crate::ConfigError;
use crate::Format;
use crate::RunReport;
use colored::Colorize;
use std::fmt::Debug;
use std::io::Write as _;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputVerbosity {
    Progress,
    Full,
}

/// A human readable output emitter.
#[derive(Clone, Debug)]
pub struct Text {
    progress: OutputVerbosity,
}

impl Text {
    /// Announce every test before it runs, then print its status.
    pub fn verbose() -> Self {
        Self {
            progress: OutputVerbosity::Full,
        }
    }
    /// Only print the status of each test, failures and the summary.
    pub fn quiet() -> Self {
        Self {
            progress: OutputVerbosity::Progress,
        }
    }

    fn is_full_output(&self) -> bool {
        matches!(self.progress, OutputVerbosity::Full)
    }
}

impl From<Format> for Text {
    fn from(format: Format) -> Self {
        match format {
            Format::Terse => Text::quiet(),
            Format::Pretty | Format::Json => Text::verbose(),
        }
    }
}

struct TextTest {
    file: CandidateFile,
}

impl TestStatus for TextTest {
    fn done(&self, outcome: &Outcome, check: &CheckResult) {
        let target = self.file.target();
        match outcome {
            Outcome::Pass => println!("{target} ... {}", "ok".green()),
            Outcome::UnexpectedSuccess => {
                println!(
                    "{} Compilation succeeded unexpectedly: {target}",
                    "FAIL:".bright_red().bold()
                );
                println!("command: {}", check.command);
            }
            Outcome::MissingExpectations(unmet) => {
                println!(
                    "{} Expected errors not found for {target}:",
                    "FAIL:".bright_red().bold()
                );
                for expectation in unmet {
                    println!("  - {expectation}");
                }
                if let Some(spawn_error) = &check.spawn_error {
                    println!("{} {spawn_error}", "error:".bright_red());
                }
                println!("command: {}", check.command);
            }
        }
    }

    fn output<'a>(&'a self, check: &'a CheckResult) -> Box<dyn Debug + 'a> {
        #[derive(Debug)]
        struct Guard<'a> {
            target: &'a str,
            stderr: &'a [u8],
        }
        impl<'a> Drop for Guard<'a> {
            fn drop(&mut self) {
                let mut stdout = std::io::stdout().lock();
                let _ = writeln!(stdout, "=== output for {}", self.target);
                let _ = stdout.write_all(self.stderr);
                if !self.stderr.ends_with(b"\n") {
                    let _ = writeln!(stdout);
                }
                let _ = writeln!(stdout, "=== end output for {}", self.target);
                let _ = stdout.flush();
            }
        }
        Box::new(Guard {
            target: self.file.target(),
            stderr: &check.stderr,
        })
    }

    fn file(&self) -> &CandidateFile {
        &self.file
    }
}

impl StatusEmitter for Text {
    fn register_test(&self, file: &CandidateFile) -> Box<dyn TestStatus> {
        if self.is_full_output() {
            println!("Testing {}...", file.target());
            let _ = std::io::stdout().flush();
        }
        Box::new(TextTest { file: file.clone() })
    }

    fn finalize(&self, report: &RunReport) {
        println!();
        if report.is_success() {
            println!("All tests failed to compile with expected errors!");
        } else {
            if !report.unexpected_success().is_empty() {
                println!(
                    "{}",
                    "FAIL: Successfully compiled targets that should have failed:"
                        .bright_red()
                        .underline()
                        .bold()
                );
                for target in report.unexpected_success() {
                    println!("  {target}");
                }
                println!();
            }
            if !report.missing_expectations().is_empty() {
                println!(
                    "{}",
                    "FAIL: Missing expected error messages:"
                        .bright_red()
                        .underline()
                        .bold()
                );
                for (target, unmet) in report.missing_expectations() {
                    println!("  {target}:");
                    for expectation in unmet {
                        println!("    - {expectation}");
                    }
                }
                println!();
            }
        }
        println!();
        if report.is_success() {
            print!("test result: {}.", "ok".green());
        } else {
            print!("test result: {}.", "FAIL".bright_red());
            print!(" {} failed", report.failed().to_string().red());
            if !report.passed().is_empty() {
                print!(";");
            }
        }
        if !report.passed().is_empty() {
            print!(" {} passed", report.passed().len().to_string().green());
        }
        println!();
        println!();
    }

    fn aborted(&self, error: &ConfigError) {
        let text = format!("{} {error}", "error:".bright_red());
        println!("{}", text.bold());
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            println!("  caused by: {cause}");
            source = cause.source();
        }
    }
}
