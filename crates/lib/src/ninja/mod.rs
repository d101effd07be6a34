//! Build graph compiler.
//!
//! Lowers a [`Project`] into a Ninja build description: one `cxx` edge per
//! (target, source), one `link` edge per target and a `default` line naming
//! every binary. Object paths are namespaced by target name so two targets
//! sharing a source never collide, and they depend only on the target name
//! and the source path so Ninja's depfile tracking stays stable across
//! regenerations.
//!
//! Generation is pure: equal projects produce byte-identical text.

mod escape;

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::consts::{BIN_DIR, BUILD_DIR};
use crate::platform::exe_suffix;
use crate::project::{Project, Target};
use crate::toolchain::Toolchain;

pub use escape::{escape_path, escape_value};

pub const NINJA_REQUIRED_VERSION: &str = "1.3";

/// Object file produced for `source` when compiled as part of `target`.
///
/// Returned already escaped for use in a `build` line.
pub fn object_path(target: &str, source: &str) -> String {
  format!("$builddir/{}/{}.o", escape_path(target), escape_path(source))
}

/// Linked binary for `target`, relative to the project root and escaped.
pub fn binary_path(target: &str) -> String {
  escape_path(&format!("{}/{}{}", BIN_DIR, target, exe_suffix()))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NinjaWriter {
  toolchain: Toolchain,
}

impl NinjaWriter {
  pub fn new(toolchain: Toolchain) -> Self {
    Self { toolchain }
  }

  /// Render the whole build description.
  pub fn generate(&self, project: &Project) -> String {
    let mut out = String::new();
    self.write_header(&mut out);
    self.write_rules(&mut out);

    let mut binaries = Vec::with_capacity(project.targets.len());
    for target in &project.targets {
      binaries.push(self.write_target(&mut out, target));
    }

    if !binaries.is_empty() {
      out.push_str("default ");
      out.push_str(&binaries.join(" "));
      out.push('\n');
    }

    out
  }

  fn write_header(&self, out: &mut String) {
    out.push_str("# Generated by anvil. Do not edit.\n");
    out.push_str(&format!("ninja_required_version = {}\n", NINJA_REQUIRED_VERSION));
    out.push_str(&format!("builddir = {}\n\n", BUILD_DIR));
  }

  fn write_rules(&self, out: &mut String) {
    let cxx = self.toolchain.cxx();

    out.push_str("rule cxx\n");
    out.push_str(&format!("  command = {} -MD -MF $out.d $FLAGS $INCLUDES -c $in -o $out\n", cxx));
    out.push_str("  description = CXX $out\n");
    out.push_str("  depfile = $out.d\n");
    out.push_str("  deps = gcc\n\n");

    out.push_str("rule link\n");
    out.push_str(&format!("  command = {} $in -o $out $LINK_FLAGS\n", cxx));
    out.push_str("  description = LINK $out\n\n");
  }

  /// Emit compile and link edges for one target, returning its binary path.
  fn write_target(&self, out: &mut String, target: &Target) -> String {
    let mut flags = vec![target.standard.flag()];
    flags.extend(target.defines.iter().map(|def| format!("-D{}", def)));
    let flags = escape_value(&flags.join(" "));

    let includes = target
      .include_dirs
      .iter()
      .map(|dir| format!("-I{}", dir))
      .collect::<Vec<_>>()
      .join(" ");
    let includes = escape_value(&includes);

    let mut objects = Vec::with_capacity(target.sources.len());
    for source in &target.sources {
      let obj = object_path(&target.name, source);
      out.push_str(&format!("build {}: cxx {}\n", obj, escape_path(source)));
      binding(out, "FLAGS", &flags);
      binding(out, "INCLUDES", &includes);
      binding(out, "depfile", &format!("{}.d", obj));
      out.push('\n');
      objects.push(obj);
    }

    let binary = binary_path(&target.name);
    out.push_str(&format!("build {}: link", binary));
    for obj in &objects {
      out.push(' ');
      out.push_str(obj);
    }
    out.push('\n');
    binding(out, "LINK_FLAGS", &escape_value(&target.link_flags.join(" ")));
    out.push('\n');

    debug!(target = %target.name, objects = objects.len(), binary = %binary, "lowered target");
    binary
  }
}

fn binding(out: &mut String, name: &str, value: &str) {
  if value.is_empty() {
    out.push_str(&format!("  {} =\n", name));
  } else {
    out.push_str(&format!("  {} = {}\n", name, value));
  }
}

/// Generate and write the build description to `path`.
///
/// The only possible failure is I/O on the destination.
pub fn write_build_file(project: &Project, toolchain: Toolchain, path: &Path) -> std::io::Result<()> {
  let content = NinjaWriter::new(toolchain).generate(project);
  fs::write(path, content)?;
  info!(
    path = %path.display(),
    toolchain = %toolchain,
    targets = project.targets.len(),
    "wrote build description"
  );
  Ok(())
}
