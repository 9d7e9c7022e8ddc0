//! Global context for cargo-for-c operations.
//!
//! Resolves the one piece of ambient state the tool reads (the directory it
//! was started in) once, at the top of the binary. Everything below receives
//! explicit paths.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::project::SENTINEL_DIR;
use crate::util::config::{global_config_path, load_config, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Directory the command operates on
    cwd: PathBuf,

    /// Global configuration file, if a home directory is known
    global_config: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            cwd,
            global_config: global_config_path(),
        }
    }

    /// Use a specific global configuration file (or none).
    pub fn with_global_config(mut self, path: Option<PathBuf>) -> Self {
        self.global_config = path;
        self
    }

    /// Get the working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn global_config_path(&self) -> Option<&Path> {
        self.global_config.as_deref()
    }

    /// Get the project configuration file path for a project root.
    pub fn project_config_path(&self, root: &Path) -> PathBuf {
        root.join(SENTINEL_DIR).join("config.toml")
    }

    /// Load global + project configuration for a project root.
    pub fn config_for(&self, root: &Path) -> Config {
        load_config(self.global_config_path(), &self.project_config_path(root))
    }
}
