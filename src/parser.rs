//! Extraction of the expected diagnostics from test files.

use std::{num::NonZeroUsize, path::Path};

use bstr::ByteSlice;

use crate::ConfigError;


/// The marker that starts an expected diagnostic substring.
pub const MARKER: &str = "EXPECT:";

/// A substring that has to show up in the diagnostics of a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    text: String,
    line: NonZeroUsize,
}

impl Expectation {
    /// The expected substring.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The line of the test file this expectation was declared on.
    pub fn line(&self) -> NonZeroUsize {
        self.line
    }
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// All expectations of a single test file, in the order they are declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expectations(Vec<Expectation>);

impl std::ops::Deref for Expectations {
    type Target = [Expectation];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Expectations {
    /// Read `path` and collect its expectations.
    /// A file without any `EXPECT:` line is an error, as it can never be checked.
    pub fn parse_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_owned(),
            source,
        })?;
        let expectations = Self::parse(&content);
        if expectations.is_empty() {
            return Err(ConfigError::NoExpectations {
                path: path.to_owned(),
            });
        }
        Ok(expectations)
    }

    /// Parse expectations in `content`.
    /// Every line containing `EXPECT:` contributes the rest of that line after the
    /// marker, trimmed. Duplicates are kept.
    pub fn parse(content: &(impl AsRef<[u8]> + ?Sized)) -> Self {
        let mut expectations = vec![];
        for (l, line) in content.as_ref().lines().enumerate() {
            let Some(pos) = line.find(MARKER) else {
                continue;
            };
            let rest = line[pos + MARKER.len()..].trim();
            expectations.push(Expectation {
                text: rest.to_str_lossy().into_owned(),
                // enumerate starts at 0, but line numbers start at 1
                line: NonZeroUsize::MIN.saturating_add(l),
            });
        }
        Self(expectations)
    }
}
