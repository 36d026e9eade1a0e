use crate::CommandBuilder;
use std::path::PathBuf;

mod args;
pub use args::{Args, Format};

#[derive(Debug, Clone)]
/// Central datastructure containing all information to run the tests.
pub struct Config {
    /// The folder containing the test files. Subfolders are not searched.
    /// Also the working directory of the checker.
    pub root_dir: PathBuf,
    /// The checker to run. The build target of each test file gets appended
    /// to its arguments.
    pub program: CommandBuilder,
    /// Extension (without the dot) of the files that are tests.
    pub extension: String,
    /// Print the checker output even for tests that passed.
    pub show_output: bool,
}

impl Config {
    /// Create a configuration for checking each test file as its own
    /// binary target with `cargo check --bin`.
    pub fn cargo_check(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            program: CommandBuilder::cargo_check(),
            extension: "rs".into(),
            show_output: false,
        }
    }

    /// Populate the config with the values from parsed command line arguments.
    /// The test directory is only overwritten if one was given.
    pub fn with_args(&mut self, args: &Args) {
        let Args {
            ref dir,
            show_output,
            quiet: _,
            format: _,
        } = *args;

        if let Some(dir) = dir {
            self.root_dir = dir.clone();
        }
        self.show_output |= show_output;
    }

    /// The directory the running executable lives in.
    /// Used as the test directory if none is given on the command line.
    pub fn default_root_dir() -> std::io::Result<PathBuf> {
        let exe = std::env::current_exe()?;
        Ok(exe
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")))
    }
}
