//! CLI smoke tests for anvil.
//!
//! These tests verify argument handling and the commands that do not need a
//! C++ toolchain.

use std::fs;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn anvil_cmd() -> Command {
  cargo_bin_cmd!("anvil")
}

/// A project directory containing only a build script.
fn temp_project() -> TempDir {
  let temp = TempDir::new().unwrap();
  fs::write(temp.path().join("build.cpp"), "void configure(anvil::Project&) {}\n").unwrap();
  temp
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  anvil_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"))
    .stdout(predicate::str::contains("build"))
    .stdout(predicate::str::contains("clean"))
    .stdout(predicate::str::contains("--bsp").not());
}

#[test]
fn version_flag_works() {
  anvil_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("anvil"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["build", "clean", "run", "test"] {
    anvil_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

#[test]
fn no_arguments_prints_help() {
  anvil_cmd().assert().failure().stderr(predicate::str::contains("Usage"));
}

// =============================================================================
// Missing build script
// =============================================================================

#[test]
fn commands_require_build_script() {
  let temp = TempDir::new().unwrap();

  for cmd in &["build", "clean", "run", "test", "--bsp"] {
    anvil_cmd()
      .arg(cmd)
      .current_dir(temp.path())
      .assert()
      .code(1)
      .stderr(predicate::str::contains("build.cpp not found"));
  }
}

// =============================================================================
// clean
// =============================================================================

#[test]
fn clean_removes_build_outputs() {
  let temp = temp_project();
  let root = temp.path();
  fs::create_dir_all(root.join(".anvil_build/app")).unwrap();
  fs::write(root.join(".anvil_build/app/main.cpp.o"), "").unwrap();
  fs::create_dir_all(root.join("bin")).unwrap();
  fs::write(root.join("bin/app"), "").unwrap();
  fs::write(root.join("build.ninja"), "").unwrap();
  fs::write(root.join(".ninja_log"), "").unwrap();
  fs::create_dir_all(root.join(".anvil")).unwrap();
  fs::write(root.join(".anvil/runner"), "").unwrap();

  anvil_cmd()
    .arg("clean")
    .current_dir(root)
    .assert()
    .success()
    .stderr(predicate::str::contains("Removed 4 build output(s)"));

  assert!(!root.join(".anvil_build").exists());
  assert!(!root.join("bin").exists());
  assert!(!root.join("build.ninja").exists());
  assert!(!root.join(".ninja_log").exists());
  assert!(root.join(".anvil/runner").exists());
  assert!(root.join("build.cpp").exists());
}

#[test]
fn clean_on_clean_tree_is_a_no_op() {
  let temp = temp_project();

  anvil_cmd()
    .arg("clean")
    .current_dir(temp.path())
    .assert()
    .success()
    .stderr(predicate::str::contains("Nothing to clean"));
}
