//! Project-relative locations.
//!
//! Every path anvil reads or writes hangs off the project root:
//!
//! ```text
//! <root>/
//! ├── build.cpp               # user configuration
//! ├── build.ninja             # generated build description
//! ├── bin/<target>            # linked binaries
//! ├── .anvil_build/<target>/  # object files and depfiles
//! └── .anvil/
//!     ├── runner              # compiled configuration executable
//!     ├── include/anvil/      # hydrated api.hpp + driver.cpp
//!     ├── libraries/          # conan deploy output
//!     └── tools/              # provisioned executor (optional)
//! ```

use std::path::{Path, PathBuf};

use crate::consts::{BIN_DIR, BUILD_DIR, BUILD_FILE, BUILD_SCRIPT, CACHE_DIR};
use crate::platform::os::exe_suffix;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
  root: PathBuf,
}

impl ProjectLayout {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Layout rooted at the canonicalized current directory.
  pub fn current() -> std::io::Result<Self> {
    let cwd = std::env::current_dir()?;
    Ok(Self::new(dunce::canonicalize(&cwd).unwrap_or(cwd)))
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn build_script(&self) -> PathBuf {
    self.root.join(BUILD_SCRIPT)
  }

  pub fn build_file(&self) -> PathBuf {
    self.root.join(BUILD_FILE)
  }

  pub fn cache_dir(&self) -> PathBuf {
    self.root.join(CACHE_DIR)
  }

  pub fn libraries_dir(&self) -> PathBuf {
    self.cache_dir().join("libraries")
  }

  /// Root of the conan `full_deploy` tree scanned for headers and archives.
  pub fn deploy_dir(&self) -> PathBuf {
    self.libraries_dir().join("full_deploy")
  }

  pub fn tools_dir(&self) -> PathBuf {
    self.cache_dir().join("tools")
  }

  pub fn object_dir(&self) -> PathBuf {
    self.root.join(BUILD_DIR)
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.root.join(BIN_DIR)
  }

  /// Absolute path of a linked target binary.
  pub fn binary(&self, target: &str) -> PathBuf {
    self.bin_dir().join(format!("{}{}", target, exe_suffix()))
  }

  /// The executor to run: a provisioned copy under `.anvil/tools` wins over `PATH`.
  pub fn ninja(&self) -> PathBuf {
    let provisioned = self.tools_dir().join(format!("ninja{}", exe_suffix()));
    if provisioned.is_file() {
      provisioned
    } else {
      PathBuf::from("ninja")
    }
  }

  /// Files and directories removed by `clean`.
  pub fn generated_outputs(&self) -> Vec<PathBuf> {
    vec![
      self.object_dir(),
      self.bin_dir(),
      self.build_file(),
      self.root.join(".ninja_log"),
      self.root.join(".ninja_deps"),
    ]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn binaries_live_under_bin() {
    let layout = ProjectLayout::new("/work/demo");
    let expected = format!("app{}", std::env::consts::EXE_SUFFIX);
    assert_eq!(layout.binary("app"), PathBuf::from("/work/demo/bin").join(expected));
  }

  #[test]
  fn deploy_dir_is_inside_cache() {
    let layout = ProjectLayout::new("/work/demo");
    assert_eq!(
      layout.deploy_dir(),
      PathBuf::from("/work/demo/.anvil/libraries/full_deploy")
    );
  }

  #[test]
  fn ninja_falls_back_to_path() {
    let temp = TempDir::new().unwrap();
    let layout = ProjectLayout::new(temp.path());
    assert_eq!(layout.ninja(), PathBuf::from("ninja"));
  }

  #[test]
  fn provisioned_ninja_is_preferred() {
    let temp = TempDir::new().unwrap();
    let layout = ProjectLayout::new(temp.path());
    std::fs::create_dir_all(layout.tools_dir()).unwrap();
    let tool = layout.tools_dir().join(format!("ninja{}", std::env::consts::EXE_SUFFIX));
    std::fs::write(&tool, "").unwrap();
    assert_eq!(layout.ninja(), tool);
  }
}
