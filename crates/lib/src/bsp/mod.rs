//! Build Server Protocol server.
//!
//! Answers editor queries about a loaded [`Project`] over a
//! `Content-Length` framed JSON-RPC stream. Requests are handled one at a
//! time, in order. Methods the server does not know, notifications included,
//! get no response. A malformed frame is logged and skipped.
//!
//! The loop ends on `build/exit` or when the input is exhausted.

pub mod framing;
pub mod types;

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::consts::{APP_NAME, BSP_VERSION};
use crate::project::{Project, Target, TargetKind};

pub use framing::{FrameError, read_frame, write_frame};
use types::*;

/// URI scheme of target identifiers.
pub const TARGET_SCHEME: &str = "anvil";

pub const LANGUAGE_CPP: &str = "cpp";

#[derive(Debug, Error)]
pub enum BspError {
  #[error(transparent)]
  Frame(#[from] FrameError),

  #[error("failed to write response: {0}")]
  Write(#[from] io::Error),

  #[error("failed to encode response: {0}")]
  Encode(#[from] serde_json::Error),
}

/// What the loop does after a request has been handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
  Reply(Value),
  Ignore,
  Exit,
}

/// Identifier of `target` within `project`, e.g. `anvil://demo/app`.
pub fn target_uri(project: &str, target: &str) -> String {
  format!("{}://{}/{}", TARGET_SCHEME, encode_segment(project), encode_segment(target))
}

fn encode_segment(segment: &str) -> String {
  url::form_urlencoded::byte_serialize(segment.as_bytes())
    .collect::<String>()
    .replace('+', "%20")
}

/// `file://` URI for an absolute path.
pub fn file_uri(path: &Path) -> String {
  Url::from_file_path(path)
    .map(String::from)
    .unwrap_or_else(|_| format!("file://{}", path.display()))
}

fn directory_uri(path: &Path) -> String {
  Url::from_directory_path(path)
    .map(String::from)
    .unwrap_or_else(|_| format!("file://{}/", path.display()))
}

pub struct BspServer<'a> {
  project: &'a Project,
}

impl<'a> BspServer<'a> {
  pub fn new(project: &'a Project) -> Self {
    Self { project }
  }

  /// Serve requests from `input` until exit or end of input.
  pub fn serve<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<(), BspError> {
    info!(project = %self.project.name, targets = self.project.targets.len(), "bsp server started");

    loop {
      let body = match read_frame(&mut input) {
        Ok(Some(body)) => body,
        Ok(None) => {
          info!("input closed, stopping bsp server");
          return Ok(());
        }
        Err(e) if e.is_recoverable() => {
          warn!(error = %e, "skipping malformed frame");
          continue;
        }
        Err(FrameError::Truncated) => {
          warn!("input ended inside a frame, stopping bsp server");
          return Ok(());
        }
        Err(e) => return Err(e.into()),
      };

      let request: Request = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
          warn!(error = %e, "skipping unparseable request");
          continue;
        }
      };

      debug!(method = %request.method, "request");
      match self.dispatch(&request)? {
        Outcome::Reply(result) => {
          let response = serde_json::to_vec(&Response::new(request.id, result))?;
          write_frame(&mut output, &response)?;
        }
        Outcome::Ignore => debug!(method = %request.method, "no response"),
        Outcome::Exit => {
          info!("exit requested, stopping bsp server");
          return Ok(());
        }
      }
    }
  }

  /// Handle one request.
  pub fn dispatch(&self, request: &Request) -> Result<Outcome, serde_json::Error> {
    let result = match request.method.as_str() {
      "build/initialize" => serde_json::to_value(self.initialize())?,
      "workspace/buildTargets" => serde_json::to_value(self.build_targets())?,
      "buildTarget/sources" => match params::<TargetsParams>(request) {
        Some(params) => serde_json::to_value(self.sources(&params))?,
        None => return Ok(Outcome::Ignore),
      },
      "buildTarget/cppOptions" => match params::<TargetsParams>(request) {
        Some(params) => serde_json::to_value(self.cpp_options(&params))?,
        None => return Ok(Outcome::Ignore),
      },
      "build/shutdown" => Value::Null,
      "build/exit" => return Ok(Outcome::Exit),
      _ => return Ok(Outcome::Ignore),
    };
    Ok(Outcome::Reply(result))
  }

  pub fn initialize(&self) -> InitializeBuildResult {
    let cpp = || LanguageProvider {
      language_ids: vec![LANGUAGE_CPP.to_string()],
    };
    InitializeBuildResult {
      display_name: APP_NAME.to_string(),
      version: env!("CARGO_PKG_VERSION").to_string(),
      bsp_version: BSP_VERSION.to_string(),
      capabilities: BuildServerCapabilities {
        compile_provider: cpp(),
        test_provider: cpp(),
        run_provider: cpp(),
        can_reload: false,
        build_target_changed_provider: false,
      },
    }
  }

  pub fn build_targets(&self) -> WorkspaceBuildTargetsResult {
    let base_directory = directory_uri(&self.project.root);
    let targets = self
      .project
      .targets
      .iter()
      .map(|target| BuildTarget {
        id: self.identifier(target),
        display_name: target.name.clone(),
        base_directory: base_directory.clone(),
        tags: vec![tag(target.kind).to_string()],
        language_ids: vec![LANGUAGE_CPP.to_string()],
        dependencies: Vec::new(),
        capabilities: BuildTargetCapabilities {
          can_compile: true,
          can_test: target.can_test(),
          can_run: target.can_run(),
          can_debug: false,
        },
      })
      .collect();
    WorkspaceBuildTargetsResult { targets }
  }

  pub fn sources(&self, params: &TargetsParams) -> SourcesResult {
    let items = self
      .selected(params)
      .map(|target| SourcesItem {
        target: self.identifier(target),
        sources: target
          .sources
          .iter()
          .map(|source| SourceItem {
            uri: file_uri(&self.project.root.join(source)),
            kind: SOURCE_KIND_FILE,
            generated: false,
          })
          .collect(),
      })
      .collect();
    SourcesResult { items }
  }

  pub fn cpp_options(&self, params: &TargetsParams) -> CppOptionsResult {
    let items = self
      .selected(params)
      .map(|target| CppOptionsItem {
        target: self.identifier(target),
        copts: target.compile_options(),
        defines: target.defines.clone(),
        linkopts: target.link_flags.clone(),
        linkshared: false,
      })
      .collect();
    CppOptionsResult { items }
  }

  fn identifier(&self, target: &Target) -> BuildTargetIdentifier {
    BuildTargetIdentifier {
      uri: target_uri(&self.project.name, &target.name),
    }
  }

  /// Targets named by `params`, or every target when none are named.
  fn selected<'p>(&'p self, params: &'p TargetsParams) -> impl Iterator<Item = &'p Target> + 'p {
    self.project.targets.iter().filter(move |target| {
      params.targets.is_empty() || params.targets.iter().any(|id| id.uri == target_uri(&self.project.name, &target.name))
    })
  }
}

fn tag(kind: TargetKind) -> &'static str {
  match kind {
    TargetKind::Executable => "application",
    TargetKind::Test => "test",
  }
}

fn params<T: DeserializeOwned + Default>(request: &Request) -> Option<T> {
  if request.params.is_null() {
    return Some(T::default());
  }
  match serde_json::from_value(request.params.clone()) {
    Ok(params) => Some(params),
    Err(e) => {
      warn!(method = %request.method, error = %e, "ignoring request with invalid params");
      None
    }
  }
}
