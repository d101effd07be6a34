//! Compiler back-ends.
//!
//! The set is closed: every command anvil emits is built from one of these
//! variants, so a plain enum is enough.

use std::fmt;

use tracing::warn;

use crate::consts::SCRIPT_COMPILER_ENV;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolchain {
  #[default]
  Clang,
  Gcc,
}

impl Toolchain {
  /// C++ compiler driver, also used for linking.
  pub fn cxx(&self) -> &'static str {
    match self {
      Self::Clang => "clang++",
      Self::Gcc => "g++",
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Clang => "clang",
      Self::Gcc => "gcc",
    }
  }

  /// Parse a user-supplied name. Unrecognized names yield `None`.
  pub fn from_name(name: &str) -> Option<Self> {
    match name.trim().to_ascii_lowercase().as_str() {
      "clang" | "clang++" => Some(Self::Clang),
      "gcc" | "g++" => Some(Self::Gcc),
      _ => None,
    }
  }

  /// Toolchain for compiling `build.cpp`, read from `ANVIL_SCRIPT_COMPILER`.
  ///
  /// Unset or unrecognized values fall back to the default toolchain.
  pub fn for_script() -> Self {
    match std::env::var(SCRIPT_COMPILER_ENV) {
      Ok(value) => Self::from_name(&value).unwrap_or_else(|| {
        warn!(
          var = SCRIPT_COMPILER_ENV,
          value = %value,
          fallback = Self::default().as_str(),
          "unrecognized script compiler"
        );
        Self::default()
      }),
      Err(_) => Self::default(),
    }
  }
}

impl fmt::Display for Toolchain {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
