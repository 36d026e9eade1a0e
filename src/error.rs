use std::path::PathBuf;

/// Problems with the test directory or its files that make the whole run meaningless.
/// These abort the run before (or instead of) checking the remaining files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The directory contained no file with the expected extension.
    #[error("No Rust files found in `{}` (looking for `*.{extension}`)", .dir.display())]
    NoFilesFound {
        /// The directory that was scanned.
        dir: PathBuf,
        /// The file extension that was looked for.
        extension: String,
    },
    /// A test file has no `EXPECT:` annotation, so it could never be checked.
    #[error("No EXPECT: lines found in `{}`", .path.display())]
    NoExpectations {
        /// The test file.
        path: PathBuf,
    },
    /// The test directory could not be listed.
    #[error("failed to read directory `{}`", .dir.display())]
    ReadDir {
        /// The directory that was scanned.
        dir: PathBuf,
        /// The underlying io error.
        #[source]
        source: std::io::Error,
    },
    /// A test file could not be read.
    #[error("failed to read `{}`", .path.display())]
    ReadFile {
        /// The test file.
        path: PathBuf,
        /// The underlying io error.
        #[source]
        source: std::io::Error,
    },
}
