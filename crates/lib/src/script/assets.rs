//! C++ sources embedded at build time and copied next to the configuration
//! executable before it is compiled.

use std::fs;
use std::path::{Path, PathBuf};

use super::ScriptError;

/// Public configuration API included by `build.cpp`.
pub const API_HPP: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/anvil/api.hpp"));

/// Program entry point linked with `build.cpp`.
pub const DRIVER_CPP: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/anvil/driver.cpp"));

/// Every embedded file, keyed by its path relative to the include root.
pub const BUNDLED: &[(&str, &str)] = &[("anvil/api.hpp", API_HPP), ("anvil/driver.cpp", DRIVER_CPP)];

/// Relative path of the driver inside the include root.
pub const DRIVER_PATH: &str = "anvil/driver.cpp";

/// Copy the embedded files under `include_root`, creating directories as needed.
///
/// Content is written verbatim; files are rewritten on every call so a newer
/// anvil replaces headers left behind by an older one.
pub fn hydrate(include_root: &Path) -> Result<Vec<PathBuf>, ScriptError> {
  let mut written = Vec::with_capacity(BUNDLED.len());
  for (relative, content) in BUNDLED {
    let path = include_root.join(relative);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).map_err(|e| ScriptError::CreateDir {
        path: parent.to_path_buf(),
        source: e,
      })?;
    }
    fs::write(&path, content).map_err(|e| ScriptError::WriteAsset {
      path: path.clone(),
      source: e,
    })?;
    written.push(path);
  }
  Ok(written)
}
