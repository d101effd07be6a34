//! Source existence checks run before the build description is written.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::project::Project;

/// A source file declared by a target that is not on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSource {
  pub target: String,
  pub path: PathBuf,
  /// Nearest ancestor of `path` that exists, if any.
  pub nearest_dir: Option<PathBuf>,
  /// File names inside `nearest_dir`, sorted.
  pub listing: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ValidationError {
  #[error("{} source file(s) not found, first: {}", missing.len(), missing[0].path.display())]
  MissingSources { missing: Vec<MissingSource> },
}

/// Check that every source of every target exists under `project.root`.
///
/// Each missing file is logged with a listing of the closest directory that
/// does exist; all of them are returned together.
pub fn check_sources(project: &Project) -> Result<(), ValidationError> {
  let mut missing = Vec::new();

  for target in &project.targets {
    for source in &target.sources {
      let path = project.root.join(source);
      if path.exists() {
        continue;
      }

      let nearest_dir = nearest_existing_ancestor(&path);
      let listing = nearest_dir.as_deref().map(list_dir).unwrap_or_default();

      debug!(
        target = %target.name,
        path = %path.display(),
        "source file not found"
      );
      if let Some(dir) = &nearest_dir {
        debug!(dir = %dir.display(), contents = ?listing, "nearest existing directory");
      }

      missing.push(MissingSource {
        target: target.name.clone(),
        path,
        nearest_dir,
        listing,
      });
    }
  }

  if missing.is_empty() {
    Ok(())
  } else {
    Err(ValidationError::MissingSources { missing })
  }
}

fn nearest_existing_ancestor(path: &Path) -> Option<PathBuf> {
  path.ancestors().skip(1).find(|p| p.is_dir()).map(Path::to_path_buf)
}

fn list_dir(dir: &Path) -> Vec<String> {
  let Ok(entries) = fs::read_dir(dir) else {
    return Vec::new();
  };
  let mut names: Vec<String> = entries
    .filter_map(|e| e.ok())
    .map(|e| e.file_name().to_string_lossy().into_owned())
    .collect();
  names.sort();
  names
}
