//! Test fixtures for common test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::project::{INCLUDE_DIR, MANIFEST_NAME, SENTINEL_DIR};

/// Fixture for a project directory on disk.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    /// Directory (and therefore project) name.
    pub name: String,
    /// `cargo.toml` content; `None` leaves the manifest out.
    pub manifest: Option<String>,
    /// `src/main.c` content; `None` leaves the entry point out.
    pub main_c: Option<String>,
    /// Whether to create the `.cargo-for-c` sentinel.
    pub sentinel: bool,
}

impl ProjectFixture {
    /// A scaffolded project with an empty dependency list and a main.c.
    pub fn new(name: impl Into<String>) -> Self {
        ProjectFixture {
            name: name.into(),
            manifest: Some("[dependencies]\n".to_string()),
            main_c: Some(MAIN_C.to_string()),
            sentinel: true,
        }
    }

    /// Use the given dependency identifiers as the manifest.
    pub fn with_dependencies(mut self, deps: &[&str]) -> Self {
        let mut manifest = String::from("[dependencies]\n");
        for dep in deps {
            manifest.push_str("  ");
            manifest.push_str(dep);
            manifest.push('\n');
        }
        self.manifest = Some(manifest);
        self
    }

    /// Use raw manifest text.
    pub fn with_manifest(mut self, content: impl Into<String>) -> Self {
        self.manifest = Some(content.into());
        self
    }

    pub fn without_manifest(mut self) -> Self {
        self.manifest = None;
        self
    }

    pub fn without_main(mut self) -> Self {
        self.main_c = None;
        self
    }

    pub fn without_sentinel(mut self) -> Self {
        self.sentinel = false;
        self
    }

    /// Write the fixture under `parent`, returning the project root.
    pub fn create(&self, parent: &Path) -> PathBuf {
        let root = parent.join(&self.name);
        fs::create_dir_all(root.join("src")).unwrap();

        if self.sentinel {
            fs::create_dir_all(root.join(SENTINEL_DIR).join(INCLUDE_DIR)).unwrap();
        }
        if let Some(manifest) = &self.manifest {
            fs::write(root.join(MANIFEST_NAME), manifest).unwrap();
        }
        if let Some(main_c) = &self.main_c {
            fs::write(root.join("src/main.c"), main_c).unwrap();
        }

        root
    }
}

const MAIN_C: &str = r#"#include <stdio.h>

int main(void) {
    printf("fixture\n");
    return 0;
}
"#;
