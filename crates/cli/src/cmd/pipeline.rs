//! Steps shared by every command that needs the evaluated project.

use anyhow::{Context, Result, bail};
use tracing::info;

use anvil_lib::consts::BUILD_SCRIPT;
use anvil_lib::deps::PackageManager;
use anvil_lib::ninja::write_build_file;
use anvil_lib::platform::ProjectLayout;
use anvil_lib::process::{Invocation, ProcessRunner};
use anvil_lib::project::{MissingSource, Project, ValidationError, check_sources};
use anvil_lib::script::{ScriptCompiler, load_project};
use anvil_lib::toolchain::Toolchain;

use crate::output::{print_error, print_info, print_step};

/// Layout of the current directory, which must contain `build.cpp`.
pub fn open_project() -> Result<ProjectLayout> {
  let layout = ProjectLayout::current().context("Failed to resolve the current directory")?;
  if !layout.build_script().is_file() {
    bail!("{} not found in {}", BUILD_SCRIPT, layout.root().display());
  }
  Ok(layout)
}

/// Compile `build.cpp` if it changed and evaluate it.
pub fn configure(layout: &ProjectLayout, runner: &dyn ProcessRunner) -> Result<Project> {
  let compiler = ScriptCompiler::new(layout.clone(), Toolchain::for_script());
  let artifact = compiler
    .compile(&layout.build_script(), runner)
    .context("Failed to compile the build script")?;
  load_project(&artifact, layout, runner).context("Failed to evaluate the build script")
}

/// A finished build: the resolved project and the executor's exit code.
pub struct Built {
  pub project: Project,
  pub code: i32,
}

impl Built {
  pub fn success(&self) -> bool {
    self.code == 0
  }
}

/// Configure, validate, resolve dependencies, write `build.ninja` and run ninja.
pub fn build(layout: &ProjectLayout, runner: &dyn ProcessRunner) -> Result<Built> {
  let mut project = configure(layout, runner)?;

  if let Err(err) = check_sources(&project) {
    let ValidationError::MissingSources { missing } = &err;
    missing.iter().for_each(report_missing);
    return Err(err.into());
  }

  PackageManager::new(layout.clone())
    .resolve(&mut project, runner)
    .context("Failed to resolve dependencies")?;

  let build_file = layout.build_file();
  write_build_file(&project, Toolchain::default(), &build_file)
    .with_context(|| format!("Failed to write {}", build_file.display()))?;

  print_step("Running ninja");
  let code = runner.run(&Invocation::new(layout.ninja()).current_dir(layout.root()))?;
  if code != 0 {
    print_error(&format!("ninja failed with exit code {}", code));
  }
  info!(code, "build finished");

  Ok(Built { project, code })
}

fn report_missing(missing: &MissingSource) {
  print_error(&format!(
    "Source file not found: {} (target '{}')",
    missing.path.display(),
    missing.target
  ));
  if let Some(dir) = &missing.nearest_dir {
    print_info(&format!("Contents of {}:", dir.display()));
    for name in &missing.listing {
      eprintln!("    {}", name);
    }
  }
}
