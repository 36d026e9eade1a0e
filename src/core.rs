//! Running the checker and comparing its output against the expectations.

use crate::{parser::Expectation, CandidateFile, Config};
use bstr::ByteSlice as _;
use std::process::Command;

/// What running the checker on a single target produced.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// The command that was run, for display purposes.
    pub command: String,
    /// Whether the checker exited successfully.
    pub success: bool,
    /// The full stderr of the checker. If the checker could not be started
    /// at all, this is the description of the spawn error.
    pub stderr: Vec<u8>,
    /// Set if the checker could not be started.
    pub spawn_error: Option<String>,
}

impl CheckResult {
    /// The text to search for expectations in.
    /// Empty if the checker never ran, as there are no real diagnostics then.
    pub fn diagnostics(&self) -> &[u8] {
        if self.spawn_error.is_some() {
            &[]
        } else {
            &self.stderr
        }
    }
}

/// Run `cmd` to completion and capture its exit status and stderr.
/// `command` is how the command gets shown to the user.
/// Failing to spawn the process counts as a failed check.
pub fn run_command(mut cmd: Command, command: String) -> CheckResult {
    match cmd.output() {
        Err(err) => {
            let msg = format!("could not spawn `{:?}` as a process: {err}", cmd.get_program());
            CheckResult {
                command,
                success: false,
                stderr: msg.clone().into_bytes(),
                spawn_error: Some(msg),
            }
        }
        Ok(output) => CheckResult {
            command,
            success: output.status.success(),
            stderr: output.stderr,
            spawn_error: None,
        },
    }
}

/// Run the configured checker on the build target of `file`.
pub fn check_file(config: &Config, file: &CandidateFile) -> CheckResult {
    let target = file.target();
    run_command(
        config.program.build(target, &config.root_dir),
        config.program.display(target).to_string(),
    )
}

/// Returns the expectations that do not occur verbatim in `diagnostics`,
/// in their original order.
pub fn unmet_expectations(expectations: &[Expectation], diagnostics: &[u8]) -> Vec<Expectation> {
    expectations
        .iter()
        .filter(|expectation| diagnostics.find(expectation.as_str()).is_none())
        .cloned()
        .collect()
}
