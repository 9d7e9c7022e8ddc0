//! High-level operations.
//!
//! This module contains the implementation of cargo-for-c commands.

pub mod cfc_build;
pub mod cfc_fetch;
pub mod cfc_new;
pub mod resolve;

pub use cfc_build::{build, build_project, BuildError, BuildOptions, BuildResult};
pub use cfc_fetch::{
    fetch, fetch_dependencies, FetchFailure, FetchOutcome, FetchRecord, FetchReport,
};
pub use cfc_new::{init_project, new_project, ScaffoldReport};
pub use resolve::{resolve_dependencies, resolve_for, Resolution};
