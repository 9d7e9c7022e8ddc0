//! Git source - dependencies cloned from git repositories.
//!
//! The clone is delegated to the `git` program (`git clone <url> <dest>`) so
//! that its exit status and stderr can be reported per dependency.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::process::{find_executable, ProcessBuilder, ProcessOutput, ProcessRunner};

/// Clones repositories with the `git` command line client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSource {
    program: PathBuf,
}

impl GitSource {
    /// Use a specific git program.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        GitSource {
            program: program.into(),
        }
    }

    /// Use the configured program, else `git` from PATH, else plain `git`
    /// (which then fails at spawn time and is reported per dependency).
    pub fn discover(configured: Option<&Path>) -> Self {
        let program = configured
            .map(Path::to_path_buf)
            .or_else(|| find_executable("git"))
            .unwrap_or_else(|| PathBuf::from("git"));
        GitSource::new(program)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The command that clones `url` into `dest`.
    pub fn clone_command(&self, url: &str, dest: &Path) -> ProcessBuilder {
        ProcessBuilder::new(&self.program)
            .arg("clone")
            .arg(url)
            .arg(dest)
    }

    /// Clone `url` into `dest`, waiting for git to finish.
    ///
    /// A non-zero exit is returned as an `Ok` output; only a failure to run
    /// git at all is an `Err`.
    pub fn clone_into(
        &self,
        runner: &mut dyn ProcessRunner,
        url: &str,
        dest: &Path,
    ) -> Result<ProcessOutput> {
        let cmd = self.clone_command(url, dest);
        tracing::info!("Cloning {}", url);
        tracing::debug!("running `{}`", cmd.display_command());
        runner.output(&cmd)
    }
}
