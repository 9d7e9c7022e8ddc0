//! Core data structures.
//!
//! - Project location and layout (`ProjectContext`, `BuildTarget`)
//! - The manifest and its dependency entries
//! - Dependency identifiers and their local keys
//! - The materialization map (include root slots and local aliases)

pub mod dependency;
pub mod manifest;
pub mod materialize;
pub mod project;

pub use dependency::{strip_protocol, DependencyIdentifier};
pub use manifest::{ManifestError, MalformedEntry, ProjectManifest};
pub use materialize::{MaterializationMap, CRATE_ROOT_ALIAS};
pub use project::{
    is_project, project_name, require_project, BuildTarget, ProjectContext, ProjectError,
    MANIFEST_NAME, SENTINEL_DIR,
};
