//! Synchronous external-command execution.
//!
//! Everything that shells out (`git`, `diff`) goes through [`CommandRunner`]
//! so tests can substitute a fake and never need real binaries.

use std::path::Path;
use std::process::{Command, Stdio};

/// Captured result of one external command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Stdout decoded lossily as UTF-8.
    pub stdout: String,
    /// Exit code, or `None` if the process was killed by a signal.
    pub status: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs a program to completion and captures its stdout.
///
/// `Err` means the process could not be spawned at all (missing binary,
/// missing working directory). A non-zero exit is still `Ok`; callers decide
/// which exit codes they accept.
pub trait CommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> std::io::Result<CommandOutput>;
}

/// [`CommandRunner`] backed by `std::process::Command`. Stderr is discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> std::io::Result<CommandOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output()?;
        tracing::debug!(program, ?args, status = ?output.status.code(), "command finished");

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            status: output.status.code(),
        })
    }
}
