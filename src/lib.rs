//! cargo-for-c - A minimal Cargo-like project manager for C
//!
//! This crate provides the library behind the `cargo-for-c` binary: project
//! location, manifest parsing, dependency fetching over git, and the single
//! compiler invocation that builds a project.

pub mod builder;
pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test utilities and mocks for cargo-for-c unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a recording process runner and on-disk
/// project fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{
    BuildTarget, DependencyIdentifier, MaterializationMap, ProjectContext, ProjectManifest,
};
pub use util::context::GlobalContext;
