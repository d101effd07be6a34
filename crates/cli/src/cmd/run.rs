//! Implementation of the `anvil run` command.

use anyhow::Result;

use anvil_lib::process::{Invocation, ProcessRunner, SystemRunner};

use super::pipeline;
use crate::output::{print_error, print_step, print_warning};

/// Build, then run the first executable target with `args`.
///
/// The program's exit code becomes anvil's exit code.
pub fn cmd_run(args: &[String]) -> Result<i32> {
  let layout = pipeline::open_project()?;
  let runner = SystemRunner;
  let built = pipeline::build(&layout, &runner)?;
  if !built.success() {
    return Ok(built.code);
  }

  let Some(target) = built.project.first_executable() else {
    print_warning("No executable target to run");
    return Ok(0);
  };

  let binary = layout.binary(&target.name);
  if !binary.is_file() {
    print_error(&format!("Executable not found: {}", binary.display()));
    return Ok(1);
  }

  print_step(&format!("Running {}", target.name));
  let code = runner.run(&Invocation::new(binary).args(args.iter().cloned()).current_dir(layout.root()))?;
  Ok(code)
}
