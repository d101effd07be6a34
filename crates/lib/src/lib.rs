//! anvil-lib: Core types and logic for Anvil
//!
//! Anvil compiles a C++ build configuration (`build.cpp`) into:
//! - `Project`: the target model the configuration declares
//! - `build.ninja`: a build description for the Ninja executor
//! - a Build Server Protocol endpoint editors can query for the same model
//!
//! The configuration program is compiled once and reused while it is newer
//! than the script (see [`script`]).

pub mod bsp;
pub mod consts;
pub mod deps;
pub mod ninja;
pub mod platform;
pub mod process;
pub mod project;
pub mod script;
pub mod toolchain;
pub mod util;
