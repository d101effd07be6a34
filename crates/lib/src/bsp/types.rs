//! Build Server Protocol messages, limited to the requests anvil answers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Source item kind for a plain file.
pub const SOURCE_KIND_FILE: u8 = 1;

/// Incoming request or notification. Notifications carry no `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
  #[serde(default)]
  pub id: Option<Value>,
  pub method: String,
  #[serde(default)]
  pub params: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct Response<T> {
  pub jsonrpc: &'static str,
  pub id: Value,
  pub result: T,
}

impl<T> Response<T> {
  pub fn new(id: Option<Value>, result: T) -> Self {
    Self {
      jsonrpc: JSONRPC_VERSION,
      id: id.unwrap_or(Value::Null),
      result,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTargetIdentifier {
  pub uri: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeBuildResult {
  pub display_name: String,
  pub version: String,
  pub bsp_version: String,
  pub capabilities: BuildServerCapabilities,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProvider {
  pub language_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildServerCapabilities {
  pub compile_provider: LanguageProvider,
  pub test_provider: LanguageProvider,
  pub run_provider: LanguageProvider,
  pub can_reload: bool,
  pub build_target_changed_provider: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTargetCapabilities {
  pub can_compile: bool,
  pub can_test: bool,
  pub can_run: bool,
  pub can_debug: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTarget {
  pub id: BuildTargetIdentifier,
  pub display_name: String,
  pub base_directory: String,
  pub tags: Vec<String>,
  pub language_ids: Vec<String>,
  pub dependencies: Vec<BuildTargetIdentifier>,
  pub capabilities: BuildTargetCapabilities,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceBuildTargetsResult {
  pub targets: Vec<BuildTarget>,
}

/// Parameters of requests scoped to a set of targets. An empty list means all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetsParams {
  #[serde(default)]
  pub targets: Vec<BuildTargetIdentifier>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceItem {
  pub uri: String,
  pub kind: u8,
  pub generated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourcesItem {
  pub target: BuildTargetIdentifier,
  pub sources: Vec<SourceItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourcesResult {
  pub items: Vec<SourcesItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CppOptionsItem {
  pub target: BuildTargetIdentifier,
  pub copts: Vec<String>,
  pub defines: Vec<String>,
  pub linkopts: Vec<String>,
  pub linkshared: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CppOptionsResult {
  pub items: Vec<CppOptionsItem>,
}
