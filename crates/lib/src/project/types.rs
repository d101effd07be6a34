//! Target model types.
//!
//! A [`Project`] is the evaluated result of a `configure(anvil::Project&)`
//! routine: an ordered list of [`Target`]s. The configuration executable
//! prints it as JSON and the host deserializes it with these same types.
//!
//! # Example
//!
//! ```json
//! {
//!   "name": "demo",
//!   "targets": [
//!     {
//!       "name": "app",
//!       "kind": "executable",
//!       "standard": "c++20",
//!       "sources": ["src/main.cpp"],
//!       "include_dirs": ["include"],
//!       "defines": ["NDEBUG"],
//!       "link_flags": [],
//!       "dependencies": ["fmt/10.2.1"]
//!     }
//!   ]
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Conventional source file an executable starts with when it exists on disk.
pub const DEFAULT_EXECUTABLE_SOURCE: &str = "src/main.cpp";

/// Conventional source file a test binary starts with when it exists on disk.
pub const DEFAULT_TEST_SOURCE: &str = "tests/main.cpp";

/// Conventional public header directory added when it exists on disk.
pub const DEFAULT_INCLUDE_DIR: &str = "include";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
  #[default]
  Executable,
  Test,
}

impl TargetKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Executable => "executable",
      Self::Test => "test",
    }
  }

  fn default_source(&self) -> &'static str {
    match self {
      Self::Executable => DEFAULT_EXECUTABLE_SOURCE,
      Self::Test => DEFAULT_TEST_SOURCE,
    }
  }
}

impl fmt::Display for TargetKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Supported C++ standard revisions, oldest first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CppStandard {
  #[serde(rename = "c++11")]
  Cpp11,
  #[serde(rename = "c++14")]
  Cpp14,
  #[serde(rename = "c++17")]
  Cpp17,
  #[serde(rename = "c++20")]
  Cpp20,
  #[default]
  #[serde(rename = "c++23")]
  Cpp23,
}

impl CppStandard {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Cpp11 => "c++11",
      Self::Cpp14 => "c++14",
      Self::Cpp17 => "c++17",
      Self::Cpp20 => "c++20",
      Self::Cpp23 => "c++23",
    }
  }

  /// The compiler flag selecting this revision, e.g. `-std=c++20`.
  pub fn flag(&self) -> String {
    format!("-std={}", self.as_str())
  }
}

impl fmt::Display for CppStandard {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// One compilation unit of output: an executable or a test binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
  pub name: String,
  #[serde(default)]
  pub kind: TargetKind,
  #[serde(default)]
  pub standard: CppStandard,
  /// Paths relative to the project root, in declaration order.
  #[serde(default)]
  pub sources: Vec<String>,
  #[serde(default)]
  pub include_dirs: Vec<String>,
  #[serde(default)]
  pub defines: Vec<String>,
  #[serde(default)]
  pub link_flags: Vec<String>,
  /// Opaque package identifiers, e.g. `fmt/10.2.1`.
  #[serde(default)]
  pub dependencies: Vec<String>,
}

impl Target {
  /// An empty target with no defaults applied.
  pub fn new(name: impl Into<String>, kind: TargetKind) -> Self {
    Self {
      name: name.into(),
      kind,
      standard: CppStandard::default(),
      sources: Vec::new(),
      include_dirs: Vec::new(),
      defines: Vec::new(),
      link_flags: Vec::new(),
      dependencies: Vec::new(),
    }
  }

  /// A target pre-populated with the conventional defaults found under `root`.
  ///
  /// Only probes the filesystem; nothing is created.
  pub fn with_defaults(name: impl Into<String>, kind: TargetKind, root: &Path) -> Self {
    let mut target = Self::new(name, kind);
    if root.join(kind.default_source()).is_file() {
      target.add_source(kind.default_source());
    }
    if root.join(DEFAULT_INCLUDE_DIR).is_dir() {
      target.add_include(DEFAULT_INCLUDE_DIR);
    }
    target
  }

  pub fn add_source(&mut self, source: impl Into<String>) -> &mut Self {
    self.sources.push(source.into());
    self
  }

  pub fn add_include(&mut self, dir: impl Into<String>) -> &mut Self {
    self.include_dirs.push(dir.into());
    self
  }

  pub fn add_define(&mut self, define: impl Into<String>) -> &mut Self {
    self.defines.push(define.into());
    self
  }

  pub fn add_link_flag(&mut self, flag: impl Into<String>) -> &mut Self {
    self.link_flags.push(flag.into());
    self
  }

  pub fn add_dependency(&mut self, package: impl Into<String>) -> &mut Self {
    self.dependencies.push(package.into());
    self
  }

  pub fn can_run(&self) -> bool {
    self.kind == TargetKind::Executable
  }

  pub fn can_test(&self) -> bool {
    self.kind == TargetKind::Test
  }

  /// Compiler options shared by the build graph and the protocol server:
  /// the standard flag, one `-I` per include dir, one `-D` per define.
  pub fn compile_options(&self) -> Vec<String> {
    let mut opts = Vec::with_capacity(1 + self.include_dirs.len() + self.defines.len());
    opts.push(self.standard.flag());
    opts.extend(self.include_dirs.iter().map(|dir| format!("-I{}", dir)));
    opts.extend(self.defines.iter().map(|def| format!("-D{}", def)));
    opts
  }
}

/// Top-level container of targets, in declaration order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub targets: Vec<Target>,
  /// Directory default paths are probed against. Not part of the wire format.
  #[serde(skip)]
  pub root: PathBuf,
}

impl Project {
  pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
    Self {
      name: name.into(),
      targets: Vec::new(),
      root: root.into(),
    }
  }

  /// Declare an executable. `configure` sees the defaults and may override anything.
  pub fn add_executable<F>(&mut self, name: &str, configure: F) -> &mut Self
  where
    F: FnOnce(&mut Target),
  {
    self.add_target(name, TargetKind::Executable, configure)
  }

  /// Declare a test binary.
  pub fn add_test<F>(&mut self, name: &str, configure: F) -> &mut Self
  where
    F: FnOnce(&mut Target),
  {
    self.add_target(name, TargetKind::Test, configure)
  }

  fn add_target<F>(&mut self, name: &str, kind: TargetKind, configure: F) -> &mut Self
  where
    F: FnOnce(&mut Target),
  {
    let mut target = Target::with_defaults(name, kind, &self.root);
    configure(&mut target);
    self.targets.push(target);
    self
  }

  /// Parse the JSON printed by a configuration executable.
  pub fn from_json(json: &str, root: impl Into<PathBuf>) -> Result<Self, serde_json::Error> {
    let mut project: Project = serde_json::from_str(json)?;
    project.root = root.into();
    Ok(project)
  }

  /// First declared executable, the one `run` launches.
  pub fn first_executable(&self) -> Option<&Target> {
    self.targets.iter().find(|t| t.can_run())
  }

  pub fn tests(&self) -> impl Iterator<Item = &Target> {
    self.targets.iter().filter(|t| t.can_test())
  }

  /// Every dependency id across all targets, first-seen order, without repeats.
  pub fn unique_dependencies(&self) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for dep in self.targets.iter().flat_map(|t| t.dependencies.iter()) {
      if !seen.contains(&dep.as_str()) {
        seen.push(dep);
      }
    }
    seen
  }
}
