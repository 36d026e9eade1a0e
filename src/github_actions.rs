//! An interface to github actions workflow commands.
//!
//! Workflow commands go to stderr, stdout is reserved for the test report
//! (which may be JSON).

use std::{
    fmt::{self, Write},
    num::NonZeroUsize,
};

/// Whether we are running as a step of a github actions job.
pub fn is_active() -> bool {
    std::env::var_os("GITHUB_ACTION").is_some()
}

/// Shows an error message directly in a github diff view on drop.
#[derive(Debug)]
pub struct Error {
    file: String,
    line: Option<NonZeroUsize>,
    title: String,
    message: String,
}

impl Error {
    /// Set a line for this error. By default the message is shown at the top of the file.
    pub fn line(mut self, line: NonZeroUsize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Create an error to be shown for the given file and with the given title.
pub fn error(file: impl fmt::Display, title: impl Into<String>) -> Error {
    Error {
        file: file.to_string(),
        line: None,
        title: title.into(),
        message: String::new(),
    }
}

impl Write for Error {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.message.write_str(s)
    }
}

/// Renders the `::error` workflow command.
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "::error file={}", escape_property(&self.file))?;
        if let Some(line) = self.line {
            write!(f, ",line={line}")?;
        }
        write!(f, ",title={}::", escape_property(&self.title))?;
        let message = self.message.trim();
        if message.is_empty() {
            f.write_str("no message")
        } else {
            f.write_str(&escape_data(message))
        }
    }
}

impl Drop for Error {
    fn drop(&mut self) {
        if is_active() {
            eprintln!("{self}");
        }
    }
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\n', "%0A")
        .replace('\r', "%0D")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

/// All github actions log messages from this call to the Drop of the return value
/// will be grouped and hidden by default in logs. Note that nesting these does
/// not really work.
pub fn group(name: impl fmt::Display) -> Group {
    if is_active() {
        eprintln!("::group::{}", escape_data(&name.to_string()));
    }
    Group(())
}

/// A guard that closes the current github actions log group on drop.
#[derive(Debug)]
pub struct Group(());

impl Drop for Group {
    fn drop(&mut self) {
        if is_active() {
            eprintln!("::endgroup::");
        }
    }
}

/// A file to append markdown to that github shows on the summary page of a workflow run.
pub fn summary() -> Option<impl std::io::Write> {
    let path = std::env::var_os("GITHUB_STEP_SUMMARY")?;
    std::fs::OpenOptions::new().append(true).open(path).ok()
}
