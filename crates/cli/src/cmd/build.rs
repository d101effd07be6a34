//! Implementation of the `anvil build` command.

use anyhow::Result;

use anvil_lib::process::SystemRunner;

use super::pipeline;
use crate::output::print_success;

/// Execute the build command.
///
/// Returns ninja's exit code unchanged so callers see exactly why a build failed.
pub fn cmd_build() -> Result<i32> {
  let layout = pipeline::open_project()?;
  let built = pipeline::build(&layout, &SystemRunner)?;

  if built.success() {
    print_success(&format!(
      "Built {} target(s) for {}",
      built.project.targets.len(),
      built.project.name
    ));
  }
  Ok(built.code)
}
