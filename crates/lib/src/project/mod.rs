//! The target model a configuration routine populates.
//!
//! Built once per process, then read by the build graph compiler and the
//! protocol server. Only dependency resolution appends to it afterwards.

mod types;
pub mod validate;

pub use types::*;
pub use validate::{MissingSource, ValidationError, check_sources};

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  #[test]
  fn defaults_use_conventional_paths_when_present() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src")).unwrap();
    fs::create_dir_all(temp.path().join("include")).unwrap();
    fs::write(temp.path().join("src/main.cpp"), "int main() {}").unwrap();

    let mut project = Project::new("demo", temp.path());
    project.add_executable("app", |_| {});

    let app = &project.targets[0];
    assert_eq!(app.kind, TargetKind::Executable);
    assert_eq!(app.standard, CppStandard::Cpp23);
    assert_eq!(app.sources, vec![DEFAULT_EXECUTABLE_SOURCE]);
    assert_eq!(app.include_dirs, vec![DEFAULT_INCLUDE_DIR]);
  }

  #[test]
  fn defaults_are_skipped_when_paths_are_absent() {
    let temp = TempDir::new().unwrap();
    let mut project = Project::new("demo", temp.path());
    project.add_test("unit", |_| {});

    let unit = &project.targets[0];
    assert_eq!(unit.kind, TargetKind::Test);
    assert!(unit.sources.is_empty());
    assert!(unit.include_dirs.is_empty());
  }

  #[test]
  fn test_targets_default_to_tests_main() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("tests")).unwrap();
    fs::write(temp.path().join("tests/main.cpp"), "").unwrap();

    let mut project = Project::new("demo", temp.path());
    project.add_test("unit", |_| {});

    assert_eq!(project.targets[0].sources, vec![DEFAULT_TEST_SOURCE]);
  }

  #[test]
  fn callback_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src")).unwrap();
    fs::write(temp.path().join("src/main.cpp"), "").unwrap();

    let mut project = Project::new("demo", temp.path());
    project.add_executable("app", |t| {
      t.standard = CppStandard::Cpp17;
      t.sources = vec!["app.cpp".to_string()];
      t.add_define("FOO=1").add_link_flag("-lm");
    });

    let app = &project.targets[0];
    assert_eq!(app.standard, CppStandard::Cpp17);
    assert_eq!(app.sources, vec!["app.cpp"]);
    assert_eq!(app.defines, vec!["FOO=1"]);
    assert_eq!(app.link_flags, vec!["-lm"]);
  }

  #[test]
  fn duplicate_names_are_kept_in_order() {
    let mut project = Project::new("demo", "/nonexistent");
    project.add_executable("app", |t| {
      t.add_source("a.cpp");
    });
    project.add_executable("app", |t| {
      t.add_source("b.cpp");
    });

    assert_eq!(project.targets.len(), 2);
    assert_eq!(project.targets[1].sources, vec!["b.cpp"]);
  }

  #[test]
  fn compile_options_follow_standard_includes_defines() {
    let mut target = Target::new("app", TargetKind::Executable);
    target.standard = CppStandard::Cpp20;
    target.add_include("include").add_include("third_party");
    target.add_define("NDEBUG").add_define("LEVEL=2");

    assert_eq!(
      target.compile_options(),
      vec!["-std=c++20", "-Iinclude", "-Ithird_party", "-DNDEBUG", "-DLEVEL=2"]
    );
  }

  #[test]
  fn parses_driver_output_with_missing_fields() {
    let json = r#"{
      "name": "demo",
      "targets": [
        {"name": "app", "sources": ["src/main.cpp"]},
        {"name": "unit", "kind": "test", "standard": "c++17", "dependencies": ["gtest/1.14.0"]}
      ]
    }"#;

    let project = Project::from_json(json, "/work/demo").unwrap();

    assert_eq!(project.root, std::path::PathBuf::from("/work/demo"));
    assert_eq!(project.targets[0].kind, TargetKind::Executable);
    assert_eq!(project.targets[0].standard, CppStandard::Cpp23);
    assert_eq!(project.targets[1].kind, TargetKind::Test);
    assert_eq!(project.targets[1].standard, CppStandard::Cpp17);
    assert_eq!(project.targets[1].dependencies, vec!["gtest/1.14.0"]);
  }

  #[test]
  fn rejects_unknown_standard() {
    let json = r#"{"name": "demo", "targets": [{"name": "app", "standard": "c++98"}]}"#;
    assert!(Project::from_json(json, "/").is_err());
  }

  #[test]
  fn unique_dependencies_keep_first_seen_order() {
    let mut project = Project::new("demo", "/nonexistent");
    project.add_executable("app", |t| {
      t.add_dependency("fmt/10.2.1").add_dependency("zlib/1.3");
    });
    project.add_test("unit", |t| {
      t.add_dependency("gtest/1.14.0").add_dependency("fmt/10.2.1");
    });

    assert_eq!(
      project.unique_dependencies(),
      vec!["fmt/10.2.1", "zlib/1.3", "gtest/1.14.0"]
    );
  }

  #[test]
  fn run_and_test_selection() {
    let mut project = Project::new("demo", "/nonexistent");
    project.add_test("unit", |_| {});
    project.add_executable("app", |_| {});
    project.add_executable("tool", |_| {});

    assert_eq!(project.first_executable().map(|t| t.name.as_str()), Some("app"));
    assert_eq!(project.tests().count(), 1);
  }
}
