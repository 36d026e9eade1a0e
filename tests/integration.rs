//! Runs the `expect-fail` binary against small cargo projects whose binaries
//! are the test files.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use bstr::ByteSlice;

struct Project {
    // Keeps the directory alive.
    _dir: tempfile::TempDir,
    bins: PathBuf,
}

fn project(files: &[(&str, &str)]) -> Project {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("Cargo.toml"),
        "[package]\nname = \"compile_fail_tests\"\nversion = \"0.0.0\"\nedition = \"2021\"\n\n[workspace]\n",
    )
    .unwrap();
    let bins = dir.path().join("src").join("bin");
    std::fs::create_dir_all(&bins).unwrap();
    for (name, source) in files {
        std::fs::write(bins.join(name), source).unwrap();
    }
    Project { _dir: dir, bins }
}

fn expect_fail(dir: &Path, extra: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_expect-fail"));
    cmd.arg(dir)
        .args(extra)
        .env("NO_COLOR", "1")
        .env_remove("GITHUB_ACTION")
        .env_remove("GITHUB_STEP_SUMMARY")
        // Each project gets its own `target` directory.
        .env_remove("CARGO_TARGET_DIR");
    cmd
}

fn run(dir: &Path, extra: &[&str]) -> Output {
    expect_fail(dir, extra).output().unwrap()
}

const BORROW_TWICE: &str = r#"//! EXPECT: error[E0499]
//! EXPECT: cannot borrow `v` as mutable more than once at a time
fn main() {
    let mut v = vec![1];
    let a = &mut v;
    let b = &mut v;
    a.push(2);
    b.push(3);
}
"#;

const BUILDS_FINE: &str = r#"// EXPECT: mismatched types
fn main() {
    let _x: u32 = 5;
}
"#;

const WRONG_EXPECTATION: &str = r#"// EXPECT: mismatched types
// EXPECT: this text is not in any rustc diagnostic
fn main() {
    let _x: u32 = "five";
}
"#;

#[test]
fn empty_dir() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.contains_str("No Rust files found"));
}

#[test]
fn unannotated_file() {
    let project = project(&[("forgot.rs", "fn main() {}\n")]);
    let output = run(&project.bins, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.contains_str("No EXPECT: lines found"));
}

#[test]
fn passing_test() {
    let project = project(&[("borrow_twice.rs", BORROW_TWICE)]);
    let output = run(&project.bins, &[]);
    let stdout = output.stdout.to_str_lossy();
    assert_eq!(output.status.code(), Some(0), "{stdout}");
    assert!(stdout.contains("Testing borrow_twice..."));
    assert!(stdout.contains("All tests failed to compile with expected errors!"));
    assert!(!stdout.contains("=== output for borrow_twice"));
}

#[test]
fn show_output() {
    let project = project(&[("borrow_twice.rs", BORROW_TWICE)]);
    let output = run(&project.bins, &["--show-output"]);
    let stdout = output.stdout.to_str_lossy();
    assert_eq!(output.status.code(), Some(0), "{stdout}");
    assert!(stdout.contains("=== output for borrow_twice"));
    assert!(stdout.contains("=== end output for borrow_twice"));
    // The color override reaches cargo.
    assert!(!stdout.contains('\u{1b}'));
}

#[test]
fn failing_tests() {
    let project = project(&[
        ("borrow_twice.rs", BORROW_TWICE),
        ("builds_fine.rs", BUILDS_FINE),
        ("wrong_expectation.rs", WRONG_EXPECTATION),
    ]);
    let output = run(&project.bins, &[]);
    let stdout = output.stdout.to_str_lossy();
    assert_eq!(output.status.code(), Some(1), "{stdout}");
    assert!(stdout.contains("FAIL: Compilation succeeded unexpectedly: builds_fine"));
    assert!(stdout.contains("FAIL: Expected errors not found for wrong_expectation:"));
    assert!(stdout.contains("  - this text is not in any rustc diagnostic"));
    // Failing tests always show their output.
    assert!(stdout.contains("=== output for builds_fine"));
    assert!(stdout.contains("=== output for wrong_expectation"));
    assert!(!stdout.contains("=== output for borrow_twice"));

    let summary = stdout
        .split("FAIL: Successfully compiled targets that should have failed:")
        .nth(1)
        .unwrap();
    assert!(summary.contains("  builds_fine\n"));
    assert!(summary.contains("FAIL: Missing expected error messages:"));
    assert!(summary.contains("  wrong_expectation:\n    - this text is not in any rustc diagnostic"));
}

#[test]
fn json_format() {
    let project = project(&[
        ("borrow_twice.rs", BORROW_TWICE),
        ("builds_fine.rs", BUILDS_FINE),
    ]);
    let output = run(&project.bins, &["--format=json"]);
    assert_eq!(output.status.code(), Some(1));
    let events: Vec<serde_json::Value> = output
        .stdout
        .lines()
        .map(|line| serde_json::from_slice(line).unwrap())
        .collect();
    let last = events.last().unwrap();
    assert_eq!(last["type"], "suite");
    assert_eq!(last["passed"], 1);
    assert_eq!(last["failed"], 1);
    assert_eq!(last["unexpected_success"][0], "builds_fine");
    assert!(events
        .iter()
        .any(|e| e["name"] == "borrow_twice" && e["event"] == "ok"));
}

#[test]
fn unknown_flag() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["--bless"]);
    assert_ne!(output.status.code(), Some(0));
    assert!(output.stderr.contains_str("--bless"));
}

#[test]
fn help() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.contains_str("--show-output"));
    assert!(output.stdout.contains_str("--format"));
}

#[test]
fn terse_format() {
    let project = project(&[
        ("borrow_twice.rs", BORROW_TWICE),
        ("builds_fine.rs", BUILDS_FINE),
    ]);
    for flag in ["--quiet", "--format=terse"] {
        let output = run(&project.bins, &[flag]);
        let stdout = output.stdout.to_str_lossy();
        assert_eq!(output.status.code(), Some(1), "{stdout}");
        assert!(!stdout.contains("Testing "), "{stdout}");
        assert!(stdout.contains("borrow_twice ... ok\n"), "{stdout}");
        assert!(stdout.contains("FAIL: Compilation succeeded unexpectedly: builds_fine"));
        assert!(stdout.contains("=== output for builds_fine"));
        assert!(stdout.contains("test result: FAIL. 1 failed; 1 passed"));
    }
}

#[test]
fn summary_follows_run_order() {
    // `a-b.rs` sorts before `a.rs`, unlike the targets `a` and `a-b`.
    let project = project(&[("a.rs", WRONG_EXPECTATION), ("a-b.rs", WRONG_EXPECTATION)]);
    let output = run(&project.bins, &[]);
    let stdout = output.stdout.to_str_lossy();
    assert_eq!(output.status.code(), Some(1), "{stdout}");
    let progress: Vec<_> = stdout
        .lines()
        .filter(|line| line.starts_with("Testing "))
        .collect();
    assert_eq!(progress, ["Testing a-b...", "Testing a..."]);
    let summary = stdout
        .split("FAIL: Missing expected error messages:")
        .nth(1)
        .unwrap();
    let listed: Vec<_> = summary
        .lines()
        .filter(|line| line.starts_with("  ") && line.ends_with(':'))
        .collect();
    assert_eq!(listed, ["  a-b:", "  a:"]);
}

#[test]
fn github_actions_with_json() {
    let project = project(&[
        ("builds_fine.rs", BUILDS_FINE),
        ("wrong_expectation.rs", WRONG_EXPECTATION),
    ]);
    let summary = tempfile::NamedTempFile::new().unwrap();
    let output = expect_fail(&project.bins, &["--format=json"])
        .env("GITHUB_ACTION", "1")
        .env("GITHUB_STEP_SUMMARY", summary.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    // Workflow commands must not end up in the JSON stream.
    for line in output.stdout.lines() {
        let event: Result<serde_json::Value, _> = serde_json::from_slice(line);
        assert!(event.is_ok(), "not json: {}", line.to_str_lossy());
    }

    let stderr = output.stderr.to_str_lossy();
    assert!(
        stderr.contains(",title=compilation succeeded unexpectedly::"),
        "{stderr}"
    );
    assert!(
        stderr.contains(
            ",line=2,title=expected error not found::`this text is not in any rustc diagnostic` not found in diagnostics"
        ),
        "{stderr}"
    );
    // `mismatched types` was found, so line 1 is not annotated.
    assert!(!stderr.contains(",line=1,"), "{stderr}");
    assert!(stderr.contains("::group::output for builds_fine\n"));
    assert!(stderr.contains("::endgroup::"));

    let summary = std::fs::read_to_string(summary.path()).unwrap();
    assert!(summary.contains("* builds_fine: compilation succeeded unexpectedly\n"));
    assert!(summary.contains("* wrong_expectation: 1 expected errors not found\n"));
    assert!(summary.contains("| 2 | 0 |\n"), "{summary}");
}
