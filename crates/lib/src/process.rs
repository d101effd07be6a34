//! Blocking subprocess execution.
//!
//! Everything anvil launches (the C++ compiler, the configuration executable,
//! conan, ninja, built binaries) goes through a [`ProcessRunner`] so callers
//! can substitute a stub in tests. Calls block until the child exits; there
//! is no timeout.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

/// Exit code reported when a child was terminated without one (e.g. by a signal).
pub const NO_EXIT_CODE: i32 = 1;

#[derive(Debug, Error)]
pub enum ProcessError {
  #[error("failed to launch {program}: {source}")]
  Spawn { program: String, source: std::io::Error },
}

/// A program, its arguments and an optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: PathBuf,
  pub args: Vec<String>,
  pub cwd: Option<PathBuf>,
}

impl Invocation {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  pub fn program_name(&self) -> String {
    self.program.display().to_string()
  }

  fn command(&self) -> Command {
    let mut command = Command::new(&self.program);
    command.args(&self.args);
    if let Some(dir) = &self.cwd {
      command.current_dir(dir);
    }
    command
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program.display())?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Output of a child whose stdout and stderr were collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
  pub code: i32,
  pub stdout: String,
  pub stderr: String,
}

impl Captured {
  pub fn success(&self) -> bool {
    self.code == 0
  }
}

pub trait ProcessRunner {
  /// Run with inherited stdio and return the exit code.
  fn run(&self, invocation: &Invocation) -> Result<i32, ProcessError>;

  /// Run with stdin closed and stdout/stderr collected.
  fn capture(&self, invocation: &Invocation) -> Result<Captured, ProcessError>;
}

/// Runs real processes through `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
  fn run(&self, invocation: &Invocation) -> Result<i32, ProcessError> {
    info!(cmd = %invocation, "running");
    let status = invocation.command().status().map_err(|source| ProcessError::Spawn {
      program: invocation.program_name(),
      source,
    })?;
    let code = status.code().unwrap_or(NO_EXIT_CODE);
    debug!(program = %invocation.program_name(), code, "process exited");
    Ok(code)
  }

  fn capture(&self, invocation: &Invocation) -> Result<Captured, ProcessError> {
    info!(cmd = %invocation, "running (captured)");
    let output = invocation
      .command()
      .stdin(Stdio::null())
      .output()
      .map_err(|source| ProcessError::Spawn {
        program: invocation.program_name(),
        source,
      })?;
    let captured = Captured {
      code: output.status.code().unwrap_or(NO_EXIT_CODE),
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    debug!(program = %invocation.program_name(), code = captured.code, "process exited");
    Ok(captured)
  }
}

/// Convenience for paths that must be passed as plain string arguments.
pub fn path_arg(path: &Path) -> String {
  path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::testutil::{echo_msg, shell_cmd};

  #[test]
  fn display_joins_program_and_args() {
    let inv = Invocation::new("clang++").arg("-c").args(["a.cpp", "-o", "a.o"]);
    assert_eq!(inv.to_string(), "clang++ -c a.cpp -o a.o");
  }

  #[test]
  fn capture_collects_stdout() {
    let captured = SystemRunner.capture(&echo_msg("hello")).unwrap();
    assert!(captured.success());
    assert_eq!(captured.stdout.trim(), "hello");
  }

  #[test]
  fn run_reports_exit_code() {
    let code = SystemRunner.run(&shell_cmd("exit 3")).unwrap();
    assert_eq!(code, 3);
  }

  #[test]
  fn capture_honours_working_directory() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::write(temp.path().join("marker.txt"), "").unwrap();

    #[cfg(unix)]
    let inv = shell_cmd("ls").current_dir(temp.path());
    #[cfg(windows)]
    let inv = shell_cmd("dir /b").current_dir(temp.path());

    let captured = SystemRunner.capture(&inv).unwrap();
    assert!(captured.stdout.contains("marker.txt"));
  }

  #[test]
  fn missing_program_is_a_spawn_error() {
    let err = SystemRunner
      .run(&Invocation::new("definitely-not-a-real-program-anvil"))
      .unwrap_err();
    assert!(matches!(err, ProcessError::Spawn { .. }));
  }
}
