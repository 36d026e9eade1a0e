use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Stdio},
};

#[derive(Debug, Clone)]
/// A command, its arguments and the environment it gets run with.
/// The build target of the test file is appended as the last argument.
pub struct CommandBuilder {
    /// Path to the binary.
    pub program: OsString,
    /// Arguments passed before the target name.
    pub args: Vec<OsString>,
    /// Environment variables passed to the binary that is executed.
    /// The environment variable is removed if the second tuple field is `None`.
    /// These only ever apply to the child process.
    pub envs: Vec<(OsString, Option<OsString>)>,
}

impl CommandBuilder {
    /// Uses the `CARGO` env var or just a program named `cargo`, checking a single
    /// binary target with colored output turned off.
    pub fn cargo_check() -> Self {
        Self {
            program: std::env::var_os("CARGO").unwrap_or_else(|| "cargo".into()),
            args: vec!["check".into(), "--bin".into()],
            // The substring matching breaks on interpolated ANSI escape sequences.
            envs: vec![("CARGO_TERM_COLOR".into(), Some("never".into()))],
        }
    }

    /// Build a `CommandBuilder` for a command without any argument.
    /// You can still add arguments later.
    pub fn cmd(cmd: impl Into<OsString>) -> Self {
        Self {
            program: cmd.into(),
            args: vec![],
            envs: vec![],
        }
    }

    /// Render the command checking `target` like you'd type it on a command line.
    pub fn display<'a>(&'a self, target: &'a str) -> impl std::fmt::Display + 'a {
        struct Display<'a>(&'a CommandBuilder, &'a str);
        impl std::fmt::Display for Display<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                for (var, val) in &self.0.envs {
                    if let Some(val) = val {
                        write!(f, "{}={} ", var.to_string_lossy(), val.to_string_lossy())?;
                    }
                }
                write!(f, "{}", self.0.program.to_string_lossy())?;
                for arg in &self.0.args {
                    write!(f, " {}", arg.to_string_lossy())?;
                }
                write!(f, " {}", self.1)
            }
        }
        Display(self, target)
    }

    /// Create a command that checks `target`, running in `dir`.
    pub fn build(&self, target: &str, dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.arg(target);
        cmd.current_dir(dir);
        self.apply_env(&mut cmd);
        cmd.stdin(Stdio::null());
        cmd
    }

    pub(crate) fn apply_env(&self, cmd: &mut Command) {
        for (var, val) in self.envs.iter() {
            if let Some(val) = val {
                cmd.env(var, val);
            } else {
                cmd.env_remove(var);
            }
        }
    }
}
