//! Implementation of the hidden `anvil --bsp` mode.
//!
//! Editors start this as their build server. Stdout carries protocol frames
//! only; every diagnostic goes to stderr through tracing.
//!
//! Packages are not installed here. Whatever the last `anvil build` deployed
//! is applied, so the reported options match `build.ninja`.

use std::io;

use anyhow::{Context, Result};
use tracing::info;

use anvil_lib::bsp::BspServer;
use anvil_lib::deps::PackageManager;
use anvil_lib::process::SystemRunner;

use super::pipeline;

pub fn cmd_bsp() -> Result<i32> {
  let layout = pipeline::open_project()?;
  let mut project = pipeline::configure(&layout, &SystemRunner)?;

  if !project.unique_dependencies().is_empty() {
    info!(deploy_dir = %layout.deploy_dir().display(), "applying deployed dependencies");
    PackageManager::new(layout.clone()).apply_installed(&mut project);
  }

  let stdin = io::stdin().lock();
  let stdout = io::stdout().lock();
  BspServer::new(&project)
    .serve(stdin, stdout)
    .context("Build server stopped unexpectedly")?;
  Ok(0)
}
