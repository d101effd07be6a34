//! Third-party package resolution.
//!
//! Installation is delegated to conan, which deploys every package under
//! `.anvil/libraries/full_deploy`. That tree is then scanned without a depth
//! limit: each directory named `include` becomes an include path, and every
//! static archive directly inside a directory named `lib` becomes a link flag.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::platform::ProjectLayout;
use crate::process::{Invocation, ProcessError, ProcessRunner, path_arg};
use crate::project::Project;

/// Archive extensions picked up from `lib` directories.
pub const STATIC_LIB_EXTENSIONS: &[&str] = &["a", "lib"];

#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("failed to install dependency {package} (exit code {code}); ensure 'conan' is in your PATH")]
  InstallFailed { package: String, code: i32 },

  #[error(transparent)]
  Process(#[from] ProcessError),
}

/// Which targets receive the scanned include paths and link flags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
  /// Every target in the project.
  #[default]
  AllTargets,
  /// Only targets that declared at least one dependency.
  Declaring,
}

/// Headers and archives found in a deploy tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeployedArtifacts {
  pub include_dirs: Vec<PathBuf>,
  pub libraries: Vec<PathBuf>,
}

impl DeployedArtifacts {
  pub fn is_empty(&self) -> bool {
    self.include_dirs.is_empty() && self.libraries.is_empty()
  }
}

/// Walk `deploy_dir` and collect include directories and static libraries,
/// in path order. A missing tree yields nothing.
pub fn scan(deploy_dir: &Path) -> DeployedArtifacts {
  let mut artifacts = DeployedArtifacts::default();
  if !deploy_dir.is_dir() {
    return artifacts;
  }

  let dirs = WalkDir::new(deploy_dir)
    .sort_by_file_name()
    .into_iter()
    .filter_map(|e| e.ok())
    .filter(|e| e.file_type().is_dir());

  for entry in dirs {
    if entry.file_name() == "include" {
      artifacts.include_dirs.push(entry.into_path());
    } else if entry.file_name() == "lib" {
      artifacts.libraries.extend(static_libraries(entry.path()));
    }
  }

  artifacts
}

fn static_libraries(lib_dir: &Path) -> Vec<PathBuf> {
  WalkDir::new(lib_dir)
    .min_depth(1)
    .max_depth(1)
    .sort_by_file_name()
    .into_iter()
    .filter_map(|e| e.ok())
    .filter(|e| e.file_type().is_file())
    .map(|e| e.into_path())
    .filter(|p| {
      p.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| STATIC_LIB_EXTENSIONS.contains(&ext))
    })
    .collect()
}

pub struct PackageManager {
  layout: ProjectLayout,
  propagation: Propagation,
  program: PathBuf,
}

impl PackageManager {
  pub fn new(layout: ProjectLayout) -> Self {
    Self {
      layout,
      propagation: Propagation::default(),
      program: PathBuf::from("conan"),
    }
  }

  pub fn with_propagation(mut self, propagation: Propagation) -> Self {
    self.propagation = propagation;
    self
  }

  pub fn install_command(&self, package: &str) -> Invocation {
    Invocation::new(&self.program)
      .arg("install")
      .arg(format!("--requires={}", package))
      .arg("--deployer=full_deploy")
      .arg(format!("--output-folder={}", path_arg(&self.layout.libraries_dir())))
      .args(["--build=missing", "-v", "quiet"])
      .current_dir(self.layout.root())
  }

  /// Install every distinct dependency once, then append the deployed
  /// headers and archives to the targets selected by the propagation policy.
  ///
  /// Installation stops at the first failure.
  pub fn resolve(&self, project: &mut Project, runner: &dyn ProcessRunner) -> Result<(), ResolveError> {
    let packages: Vec<String> = project.unique_dependencies().into_iter().map(String::from).collect();
    if packages.is_empty() {
      return Ok(());
    }

    for package in &packages {
      info!(package = %package, "installing dependency");
      let code = runner.run(&self.install_command(package))?;
      if code != 0 {
        return Err(ResolveError::InstallFailed {
          package: package.clone(),
          code,
        });
      }
    }

    self.apply_installed(project);
    Ok(())
  }

  /// Append whatever is already deployed, without installing anything.
  pub fn apply_installed(&self, project: &mut Project) {
    let artifacts = scan(&self.layout.deploy_dir());
    debug!(
      includes = artifacts.include_dirs.len(),
      libraries = artifacts.libraries.len(),
      "scanned deployed packages"
    );
    apply(project, &artifacts, self.propagation);
  }
}

/// Append scanned artifacts to the targets chosen by `propagation`.
pub fn apply(project: &mut Project, artifacts: &DeployedArtifacts, propagation: Propagation) {
  for target in &mut project.targets {
    if propagation == Propagation::Declaring && target.dependencies.is_empty() {
      continue;
    }
    for dir in &artifacts.include_dirs {
      target.add_include(path_arg(dir));
    }
    for lib in &artifacts.libraries {
      target.add_link_flag(path_arg(lib));
    }
  }
}
