//! Implementation of the `anvil clean` command.
//!
//! Removes everything the build produced. The configuration cache under
//! `.anvil/` is kept so the next build does not recompile `build.cpp`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::pipeline;
use crate::output::{print_info, print_success};

pub fn cmd_clean() -> Result<i32> {
  let layout = pipeline::open_project()?;

  let mut removed = 0;
  for path in layout.generated_outputs() {
    if remove(&path)? {
      removed += 1;
    }
  }

  if removed == 0 {
    print_info("Nothing to clean");
  } else {
    print_success(&format!("Removed {} build output(s)", removed));
  }
  Ok(0)
}

/// Remove a file or directory tree. Returns false when it did not exist.
fn remove(path: &Path) -> Result<bool> {
  let Ok(meta) = fs::symlink_metadata(path) else {
    return Ok(false);
  };

  if meta.is_dir() {
    fs::remove_dir_all(path).with_context(|| format!("Failed to remove {}", path.display()))?;
  } else {
    fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
  }
  debug!(path = %path.display(), "removed");
  Ok(true)
}
