//! Project location and layout.
//!
//! A directory is a project instance when it has a `.cargo-for-c` sentinel
//! directory as an immediate child. The project's name is the directory's
//! base name. Neither fact is persisted; both are computed on demand.

use std::fs;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Sentinel directory marking a project root.
pub const SENTINEL_DIR: &str = ".cargo-for-c";

/// Include root, relative to the sentinel directory.
pub const INCLUDE_DIR: &str = "include";

/// Manifest file name at the project root.
pub const MANIFEST_NAME: &str = "cargo.toml";

/// Source directory at the project root.
pub const SOURCE_DIR: &str = "src";

/// The single translation unit, relative to the source directory.
pub const ENTRY_POINT: &str = "main.c";

/// Build output directory at the project root.
pub const TARGET_DIR: &str = "target";

/// Errors raised when a directory is not a usable project.
#[derive(Debug, Error, Diagnostic)]
pub enum ProjectError {
    #[error("`{dir}` is not a cargo-for-c project (no `.cargo-for-c` directory)")]
    #[diagnostic(
        code(cargo_for_c::project::not_a_project),
        help("run `cargo-for-c init` here, or `cargo-for-c new <name>` to start a new project")
    )]
    NotAProject { dir: PathBuf },

    #[error("cannot derive a project name from `{dir}`")]
    #[diagnostic(
        code(cargo_for_c::project::unnamed),
        help("run the command from inside a named project directory")
    )]
    Unnamed { dir: PathBuf },
}

/// Build mode. Decides the output subdirectory and whether debug symbols are
/// requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildTarget {
    #[default]
    Debug,
    Release,
}

impl BuildTarget {
    /// Map the `--release` flag to a target.
    pub fn from_release_flag(release: bool) -> Self {
        if release {
            BuildTarget::Release
        } else {
            BuildTarget::Debug
        }
    }

    /// Output subdirectory name under `target/`.
    pub fn dir_name(&self) -> &'static str {
        match self {
            BuildTarget::Debug => "debug",
            BuildTarget::Release => "release",
        }
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, BuildTarget::Debug)
    }
}

/// A directory validated as a project instance, plus its derived name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    root: PathBuf,
    name: String,
}

impl ProjectContext {
    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Project name (base name of the root directory).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<root>/.cargo-for-c`
    pub fn sentinel_dir(&self) -> PathBuf {
        self.root.join(SENTINEL_DIR)
    }

    /// `<root>/.cargo-for-c/include`, where dependencies are materialized.
    pub fn include_root(&self) -> PathBuf {
        self.sentinel_dir().join(INCLUDE_DIR)
    }

    /// `<root>/cargo.toml`
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_NAME)
    }

    /// `<root>/src`
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }

    /// `<root>/src/main.c`
    pub fn entry_point(&self) -> PathBuf {
        self.source_dir().join(ENTRY_POINT)
    }

    /// `<root>/target/<debug|release>`
    pub fn output_dir(&self, target: BuildTarget) -> PathBuf {
        self.root.join(TARGET_DIR).join(target.dir_name())
    }

    /// `<root>/target/<debug|release>/<name>`
    pub fn output_binary(&self, target: BuildTarget) -> PathBuf {
        self.output_dir(target)
            .join(format!("{}{}", self.name, std::env::consts::EXE_SUFFIX))
    }
}

/// Whether `dir` has the sentinel directory as an immediate child.
///
/// Only the entries of `dir` itself are scanned. A sentinel that is a
/// symbolic link counts if its direct target is a directory; links are not
/// followed any further than that.
pub fn is_project(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };

    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name() == SENTINEL_DIR)
        .any(|entry| match entry.file_type() {
            Ok(ty) if ty.is_dir() => true,
            Ok(ty) if ty.is_symlink() => link_targets_dir(&entry.path()),
            _ => false,
        })
}

fn link_targets_dir(link: &Path) -> bool {
    let Ok(target) = fs::read_link(link) else {
        return false;
    };
    let target = match link.parent() {
        Some(parent) if target.is_relative() => parent.join(target),
        _ => target,
    };
    fs::symlink_metadata(&target)
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

/// Validate `dir` as a project and derive its context.
///
/// Used as the precondition guard by every operation that needs a project.
pub fn require_project(dir: &Path) -> Result<ProjectContext, ProjectError> {
    if !is_project(dir) {
        return Err(ProjectError::NotAProject {
            dir: dir.to_path_buf(),
        });
    }

    let name = base_name(dir).ok_or_else(|| ProjectError::Unnamed {
        dir: dir.to_path_buf(),
    })?;

    tracing::debug!("project `{}` at {}", name, dir.display());

    Ok(ProjectContext {
        root: dir.to_path_buf(),
        name,
    })
}

/// The project's name: the final path segment of `dir`.
pub fn project_name(dir: &Path) -> Result<String, ProjectError> {
    require_project(dir).map(|ctx| ctx.name)
}

fn base_name(dir: &Path) -> Option<String> {
    let named = |p: &Path| p.file_name().map(|n| n.to_string_lossy().into_owned());
    named(dir).or_else(|| dir.canonicalize().ok().as_deref().and_then(named))
}
