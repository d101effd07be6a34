//! Configuration compiler.
//!
//! Turns the user's `build.cpp` into a runnable program by compiling it
//! together with the embedded driver, and reuses the previous program when it
//! is newer than the script. Running that program yields the [`Project`].
//!
//! Freshness is decided by modification time only: an edit that does not
//! advance the script's mtime (restored backup, clock skew) is not noticed.

pub mod assets;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::consts::SCRIPT_STANDARD;
use crate::deps;
use crate::platform::{ProjectLayout, exe_suffix};
use crate::process::{Invocation, ProcessError, ProcessRunner, path_arg};
use crate::project::Project;
use crate::toolchain::Toolchain;

/// Errors that can occur while compiling or running the configuration.
#[derive(Debug, Error)]
pub enum ScriptError {
  #[error("build script not found: {}", path.display())]
  MissingScript { path: PathBuf },

  #[error("failed to read metadata of {}: {source}", path.display())]
  Metadata { path: PathBuf, source: std::io::Error },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to write bundled source {}: {source}", path.display())]
  WriteAsset { path: PathBuf, source: std::io::Error },

  #[error(transparent)]
  Process(#[from] ProcessError),

  #[error("failed to compile build script (exit code {code}):\n{output}")]
  CompileFailed { code: i32, output: String },

  #[error("configuration program exited with code {code}:\n{stderr}")]
  ConfigureFailed { code: i32, stderr: String },

  #[error("configuration program printed an invalid project: {0}")]
  InvalidModel(#[from] serde_json::Error),
}

pub struct ScriptCompiler {
  layout: ProjectLayout,
  toolchain: Toolchain,
}

impl ScriptCompiler {
  pub fn new(layout: ProjectLayout, toolchain: Toolchain) -> Self {
    Self { layout, toolchain }
  }

  /// Where the compiled configuration program lives.
  pub fn artifact_path(&self) -> PathBuf {
    self.layout.cache_dir().join(format!("runner{}", exe_suffix()))
  }

  /// Root the embedded sources are hydrated into.
  pub fn bundled_include_dir(&self) -> PathBuf {
    self.layout.cache_dir().join("include")
  }

  /// True when the artifact exists and is strictly newer than `script`.
  pub fn is_fresh(&self, script: &Path) -> Result<bool, ScriptError> {
    let script_mtime = modified(script).map_err(|source| {
      if source.kind() == std::io::ErrorKind::NotFound {
        ScriptError::MissingScript {
          path: script.to_path_buf(),
        }
      } else {
        ScriptError::Metadata {
          path: script.to_path_buf(),
          source,
        }
      }
    })?;

    let artifact = self.artifact_path();
    match modified(&artifact) {
      Ok(artifact_mtime) => Ok(artifact_mtime > script_mtime),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
      Err(source) => Err(ScriptError::Metadata { path: artifact, source }),
    }
  }

  /// Include directories for the script, in search order: the bundled API,
  /// every `include` directory deployed by the package manager, then the
  /// project's own `src` directory when present.
  pub fn include_dirs(&self) -> Vec<PathBuf> {
    let mut dirs = vec![self.bundled_include_dir()];
    dirs.extend(deps::scan(&self.layout.deploy_dir()).include_dirs);

    let fallback = self.layout.root().join("src");
    if fallback.is_dir() {
      dirs.push(fallback);
    }
    dirs
  }

  /// The compiler invocation building `script` into the artifact.
  pub fn command(&self, script: &Path) -> Invocation {
    let driver = self.bundled_include_dir().join(assets::DRIVER_PATH);
    let mut invocation = Invocation::new(self.toolchain.cxx()).arg(format!("-std={}", SCRIPT_STANDARD));
    for dir in self.include_dirs() {
      invocation = invocation.arg(format!("-I{}", dir.display()));
    }
    invocation
      .arg(path_arg(&driver))
      .arg(path_arg(script))
      .arg("-o")
      .arg(path_arg(&self.artifact_path()))
      .current_dir(self.layout.root())
  }

  /// Return an up-to-date configuration program, compiling it if needed.
  pub fn compile(&self, script: &Path, runner: &dyn ProcessRunner) -> Result<PathBuf, ScriptError> {
    let cache_dir = self.layout.cache_dir();
    fs::create_dir_all(&cache_dir).map_err(|source| ScriptError::CreateDir {
      path: cache_dir.clone(),
      source,
    })?;

    let artifact = absolute(&self.artifact_path());
    if self.is_fresh(script)? {
      debug!(artifact = %artifact.display(), "build script unchanged, reusing");
      return Ok(artifact);
    }

    assets::hydrate(&self.bundled_include_dir())?;

    info!(script = %script.display(), toolchain = %self.toolchain, "compiling build script");
    let captured = runner.capture(&self.command(script))?;
    let output = format!("{}{}", captured.stdout, captured.stderr);

    if !captured.success() {
      return Err(ScriptError::CompileFailed {
        code: captured.code,
        output,
      });
    }
    if !output.trim().is_empty() {
      warn!(output = %output.trim_end(), "build script compiled with diagnostics");
    }

    Ok(artifact)
  }
}

/// Run the configuration program in the project root and parse its output.
pub fn load_project(artifact: &Path, layout: &ProjectLayout, runner: &dyn ProcessRunner) -> Result<Project, ScriptError> {
  let captured = runner.capture(&Invocation::new(artifact).current_dir(layout.root()))?;

  if !captured.stderr.trim().is_empty() {
    info!(output = %captured.stderr.trim_end(), "configure output");
  }
  if !captured.success() {
    return Err(ScriptError::ConfigureFailed {
      code: captured.code,
      stderr: captured.stderr,
    });
  }

  let project = Project::from_json(captured.stdout.trim(), layout.root())?;
  info!(project = %project.name, targets = project.targets.len(), "graph loaded");
  Ok(project)
}

fn modified(path: &Path) -> std::io::Result<SystemTime> {
  fs::metadata(path)?.modified()
}

fn absolute(path: &Path) -> PathBuf {
  std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
