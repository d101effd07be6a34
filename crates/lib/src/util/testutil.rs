//! Test utilities for anvil-lib.
//!
//! Cross-platform invocations for tests that need a real child process, and
//! a recording [`ProcessRunner`] for tests that must not launch anything.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::process::{Captured, Invocation, ProcessError, ProcessRunner};

/// Returns an invocation that runs `script` through the platform shell.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> Invocation {
  Invocation::new("/bin/sh").args(["-c", script])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> Invocation {
  Invocation::new("cmd.exe").args(["/C", script])
}

/// Returns an invocation that echoes a message.
///
/// On Unix, this uses /bin/echo directly.
/// On Windows, echo is a shell builtin, so we wrap it in cmd.exe.
#[cfg(unix)]
pub fn echo_msg(msg: &str) -> Invocation {
  Invocation::new("/bin/echo").arg(msg)
}

#[cfg(windows)]
pub fn echo_msg(msg: &str) -> Invocation {
  Invocation::new("cmd.exe").args(["/C", &format!("echo {}", msg)])
}

/// Records every invocation and replays queued results (exit code 0 and empty
/// output once the queue is drained).
#[derive(Default)]
pub struct RecordingRunner {
  pub calls: RefCell<Vec<Invocation>>,
  results: RefCell<VecDeque<Captured>>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Queue the result of the next call.
  pub fn push_result(&self, code: i32, stdout: &str) -> &Self {
    self.results.borrow_mut().push_back(Captured {
      code,
      stdout: stdout.to_string(),
      stderr: String::new(),
    });
    self
  }

  pub fn call_count(&self) -> usize {
    self.calls.borrow().len()
  }

  pub fn programs(&self) -> Vec<String> {
    self.calls.borrow().iter().map(|c| c.program_name()).collect()
  }

  fn next(&self, invocation: &Invocation) -> Captured {
    self.calls.borrow_mut().push(invocation.clone());
    self.results.borrow_mut().pop_front().unwrap_or_default()
  }
}

impl ProcessRunner for RecordingRunner {
  fn run(&self, invocation: &Invocation) -> Result<i32, ProcessError> {
    Ok(self.next(invocation).code)
  }

  fn capture(&self, invocation: &Invocation) -> Result<Captured, ProcessError> {
    Ok(self.next(invocation))
  }
}
