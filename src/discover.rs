//! Finding the test files in the test directory.

use crate::ConfigError;
use std::path::{Path, PathBuf};

/// A single source file that is expected to fail to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    path: PathBuf,
    target: String,
}

impl CandidateFile {
    /// Creates a candidate for `path`. The build target is the file name
    /// without its extension.
    /// Returns `None` for paths without a (utf8) file name.
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let target = path.file_stem()?.to_str()?.to_owned();
        Some(Self { path, target })
    }

    /// Path to the source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the build target that compiles this file.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// List all files in `dir` (not its subdirectories) ending in `.{extension}`,
/// sorted by file name.
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<CandidateFile>, ConfigError> {
    let read_dir_err = |source| ConfigError::ReadDir {
        dir: dir.to_owned(),
        source,
    };
    let mut entries = std::fs::read_dir(dir)
        .map_err(read_dir_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_dir_err)?;
    entries.sort_by_key(|e| e.file_name());

    let mut files = vec![];
    for entry in entries {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == extension) {
            continue;
        }
        // Follows symlinks, so linked test files are picked up.
        if !path.is_file() {
            continue;
        }
        files.extend(CandidateFile::new(path));
    }

    if files.is_empty() {
        return Err(ConfigError::NoFilesFound {
            dir: dir.to_owned(),
            extension: extension.to_owned(),
        });
    }
    Ok(files)
}
