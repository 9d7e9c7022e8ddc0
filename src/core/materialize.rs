//! Where dependencies live on disk.
//!
//! The include root holds one slot per fetched dependency, keyed by the
//! dependency's local key. The project's own source tree is registered here
//! too, as the local alias `crate-root`, so that it is addressable exactly
//! like a fetched dependency (`#include <crate-root/util.h>`).

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use anyhow::Result;

use crate::core::dependency::DependencyIdentifier;
use crate::core::project::{ProjectContext, INCLUDE_DIR, SENTINEL_DIR, SOURCE_DIR};
use crate::util::fs::{entry_exists, symlink_idempotent, Created};

/// Alias under which the project's own `src/` is exposed.
pub const CRATE_ROOT_ALIAS: &str = "crate-root";

/// Map from local keys to on-disk locations for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializationMap {
    root: PathBuf,
    include_root: PathBuf,
    /// alias key -> target, relative to the project root
    aliases: BTreeMap<String, PathBuf>,
}

impl MaterializationMap {
    /// The map for a project, with `crate-root` pointing at `src/`.
    pub fn for_project(ctx: &ProjectContext) -> Self {
        Self::new(ctx.root())
    }

    /// The map for a project rooted at `root`. Used before the root is a
    /// validated project (during scaffolding).
    pub fn new(root: &Path) -> Self {
        let mut aliases = BTreeMap::new();
        aliases.insert(CRATE_ROOT_ALIAS.to_string(), PathBuf::from(SOURCE_DIR));

        MaterializationMap {
            root: root.to_path_buf(),
            include_root: root.join(SENTINEL_DIR).join(INCLUDE_DIR),
            aliases,
        }
    }

    pub fn include_root(&self) -> &Path {
        &self.include_root
    }

    /// The slot a dependency is cloned into: `<include_root>/<local key>`.
    pub fn slot(&self, id: &DependencyIdentifier) -> PathBuf {
        self.include_root.join(id.key_path())
    }

    /// The alias whose slot `id` would fall inside, if any.
    pub fn reserved_by(&self, id: &DependencyIdentifier) -> Option<&str> {
        let first = match id.key_path().components().next()? {
            Component::Normal(first) => first.to_string_lossy().into_owned(),
            _ => return None,
        };
        self.aliases
            .get_key_value(&first)
            .map(|(alias, _)| alias.as_str())
    }

    /// Aliases and their absolute targets.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, PathBuf)> + '_ {
        self.aliases
            .iter()
            .map(|(alias, target)| (alias.as_str(), self.root.join(target)))
    }

    /// Make every alias addressable under the include root.
    ///
    /// Each alias becomes a relative directory link. Existing entries are left
    /// alone. Returns one result per alias so a platform that refuses links
    /// does not hide the others.
    pub fn materialize_aliases(&self) -> Vec<(String, Result<Created>)> {
        let up: PathBuf = Path::new(SENTINEL_DIR)
            .join(INCLUDE_DIR)
            .components()
            .map(|_| Component::ParentDir)
            .collect();

        self.aliases
            .iter()
            .map(|(alias, target)| {
                let link = self.include_root.join(alias);
                (alias.clone(), symlink_idempotent(&up.join(target), &link))
            })
            .collect()
    }

    /// Header search directories for the compiler.
    ///
    /// Always the include root. An alias that is not materialized under the
    /// include root contributes its target directory directly.
    pub fn include_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.include_root.clone()];
        for (alias, target) in self.aliases() {
            if !entry_exists(&self.include_root.join(alias)) {
                tracing::debug!("alias `{}` not linked; adding {}", alias, target.display());
                dirs.push(target);
            }
        }
        dirs
    }
}
