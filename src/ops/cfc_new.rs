//! Implementation of `cargo-for-c new` and `cargo-for-c init`.
//!
//! Scaffolding is idempotent: anything that already exists is left exactly as
//! it is, so `init` can be re-run on a project at any time.

use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::manifest::generate_manifest;
use crate::core::materialize::MaterializationMap;
use crate::core::project::{ENTRY_POINT, MANIFEST_NAME, SOURCE_DIR};
use crate::util::fs::{create_dir_idempotent, write_if_absent, Created};

const MAIN_C: &str = r#"#include <stdio.h>

int main(void) {
    printf("Hello, world!\n");
    return 0;
}
"#;

const GITIGNORE: &str = "/target\n";

/// What scaffolding did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Project root.
    pub root: PathBuf,
    /// Entries created by this run.
    pub created: Vec<PathBuf>,
    /// Entries that were already present.
    pub existing: Vec<PathBuf>,
    /// Non-fatal problems, such as a platform refusing symbolic links.
    pub warnings: Vec<String>,
}

impl ScaffoldReport {
    fn record(&mut self, path: PathBuf, created: Created) {
        match created {
            Created::New => self.created.push(path),
            Created::AlreadyExists => self.existing.push(path),
        }
    }

    /// Whether this run created nothing.
    pub fn was_up_to_date(&self) -> bool {
        self.created.is_empty()
    }
}

/// Scaffold a project in `root`, which must already exist.
pub fn init_project(root: &Path) -> Result<ScaffoldReport> {
    if !root.is_dir() {
        bail!("`{}` is not a directory", root.display());
    }

    let mut report = ScaffoldReport {
        root: root.to_path_buf(),
        ..ScaffoldReport::default()
    };
    let map = MaterializationMap::new(root);

    let include_root = map.include_root().to_path_buf();
    let created = create_dir_idempotent(&include_root)?;
    report.record(include_root, created);

    let src = root.join(SOURCE_DIR);
    let created = create_dir_idempotent(&src)?;
    report.record(src.clone(), created);

    for (alias, result) in map.materialize_aliases() {
        let link = map.include_root().join(&alias);
        match result {
            Ok(created) => report.record(link, created),
            Err(e) => {
                tracing::debug!("could not link `{}`: {:#}", alias, e);
                report.warnings.push(format!(
                    "could not create the `{}` link ({:#}); the source directory is added to the include path instead",
                    alias, e
                ));
            }
        }
    }

    let files = [
        (root.join(MANIFEST_NAME), generate_manifest()),
        (src.join(ENTRY_POINT), MAIN_C.to_string()),
        (root.join(".gitignore"), GITIGNORE.to_string()),
    ];
    for (path, contents) in files {
        let created = write_if_absent(&path, &contents)?;
        report.record(path, created);
    }

    tracing::debug!(
        "scaffolded {}: {} created, {} existing",
        root.display(),
        report.created.len(),
        report.existing.len()
    );

    Ok(report)
}

/// Create `<parent>/<name>` if needed and scaffold a project inside it.
///
/// An existing directory is not an error.
pub fn new_project(parent: &Path, name: &str) -> Result<ScaffoldReport> {
    let mut components = Path::new(name).components();
    let valid = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !valid {
        bail!("invalid project name `{}`: expected a single directory name", name);
    }

    let root = parent.join(name);
    create_dir_idempotent(&root)?;
    init_project(&root)
}
