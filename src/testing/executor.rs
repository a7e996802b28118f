//! Shell command execution
//!
//! Commands run through a shell so operators like `&&`, `>` and `>>` work.
//! This is a trust boundary: commands execute with the invoking user's
//! privileges. No timeout is applied; a command that never exits blocks
//! the run.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;

use crate::common::config::Config;
use crate::common::{Error, Result};

/// Captured result of one command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessOutcome {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// A shell interpreter used to run step commands
#[derive(Debug, Clone)]
pub struct Shell {
    program: PathBuf,
    args: Vec<String>,
}

impl Shell {
    /// Create a shell from an already resolved program path
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Resolve the configured shell on `PATH`
    pub fn from_config(config: &Config) -> Result<Self> {
        let program = which::which(&config.shell).map_err(|_| Error::ShellNotFound {
            shell: config.shell.clone(),
        })?;
        Ok(Self::new(program, config.shell_args.clone()))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run `command` in `working_dir` and wait for it to finish
    ///
    /// A non-zero exit status is a normal outcome. Only failing to start
    /// the shell itself is an error.
    pub fn execute(&self, command: &str, working_dir: &Path) -> Result<ProcessOutcome> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(command)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::ShellSpawn {
                shell: self.program.display().to_string(),
                source,
            })?;

        Ok(ProcessOutcome {
            status: exit_code(&output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Exit code of a finished process
///
/// A process killed by a signal reports `128 + signal`, as shells do.
fn exit_code(status: &std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh() -> Shell {
        Shell::from_config(&Config::default()).unwrap()
    }

    fn cwd() -> PathBuf {
        std::env::current_dir().unwrap()
    }

    #[test]
    fn test_captures_stdout_and_status() {
        let outcome = sh().execute("echo foo && exit 42", &cwd()).unwrap();
        assert_eq!(outcome.status, 42);
        assert_eq!(outcome.stdout, "foo\n");
        assert_eq!(outcome.stderr, "");
    }

    #[test]
    fn test_captures_stderr() {
        let outcome = sh().execute("echo oops >&2", &cwd()).unwrap();
        assert_eq!(outcome.status, 0);
        assert_eq!(outcome.stderr, "oops\n");
    }

    #[test]
    fn test_unknown_command_is_an_outcome() {
        let outcome = sh()
            .execute("definitely-not-a-real-command-xyz", &cwd())
            .unwrap();
        assert_eq!(outcome.status, 127);
        assert!(!outcome.stderr.is_empty());
    }

    #[test]
    fn test_runs_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "here").unwrap();
        let outcome = sh().execute("cat marker.txt", dir.path()).unwrap();
        assert_eq!(outcome.stdout, "here");
    }

    #[cfg(unix)]
    #[test]
    fn test_killed_by_signal() {
        let outcome = sh().execute("kill -9 $$", &cwd()).unwrap();
        assert_eq!(outcome.status, 128 + 9);
    }

    #[test]
    fn test_missing_shell() {
        let config = Config {
            shell: "no-such-shell-cmdspec".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            Shell::from_config(&config),
            Err(Error::ShellNotFound { .. })
        ));
    }

    #[test]
    fn test_unspawnable_shell() {
        let shell = Shell::new("/nonexistent/bin/sh", vec!["-c".to_string()]);
        assert!(matches!(
            shell.execute("echo hi", &cwd()),
            Err(Error::ShellSpawn { .. })
        ));
    }
}
