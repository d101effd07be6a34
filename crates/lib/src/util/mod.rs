//! Shared utilities.
//!
//! Test helpers for driving subprocesses on every platform.

#[cfg(test)]
pub mod testutil;
