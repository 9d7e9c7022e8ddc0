//! Dependency resolution: project check, manifest read, manifest parse.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::manifest::{MalformedEntry, ManifestError, ProjectManifest};
use crate::core::project::{require_project, ProjectContext};
use crate::core::DependencyIdentifier;

/// The declared dependencies of a project, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Manifest the list was read from.
    pub manifest_path: PathBuf,
    /// Dependency identifiers in file order. Duplicates are kept.
    pub dependencies: Vec<DependencyIdentifier>,
    /// Lines skipped as malformed.
    pub malformed: Vec<MalformedEntry>,
}

/// Resolve the dependencies of the project at `root`.
///
/// The project check happens before the manifest is touched. The manifest is
/// read fresh on every call.
pub fn resolve_dependencies(root: &Path) -> Result<Resolution> {
    let ctx = require_project(root)?;
    resolve_for(&ctx)
}

/// Resolve the dependencies of an already validated project.
pub fn resolve_for(ctx: &ProjectContext) -> Result<Resolution> {
    let manifest_path = ctx.manifest_path();

    let content = match std::fs::read_to_string(&manifest_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ManifestError::Missing {
                path: manifest_path,
            }
            .into())
        }
        Err(source) => {
            return Err(ManifestError::Read {
                path: manifest_path,
                source,
            }
            .into())
        }
    };

    let manifest = ProjectManifest::parse(&content)?;
    let malformed = manifest.malformed().to_vec();
    let dependencies = manifest
        .into_entries()
        .into_iter()
        .map(DependencyIdentifier::from)
        .collect::<Vec<_>>();

    tracing::debug!(
        "resolved {} dependencies from {}",
        dependencies.len(),
        manifest_path.display()
    );

    Ok(Resolution {
        manifest_path,
        dependencies,
        malformed,
    })
}
