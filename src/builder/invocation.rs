//! Compiler invocation assembly.
//!
//! The flag set is fixed: one `-I` per include directory, `-o <output>`, the
//! single translation unit, and `-g` for debug builds.

use std::path::{Path, PathBuf};

use crate::core::project::BuildTarget;
use crate::util::process::ProcessBuilder;

/// Everything needed to run the compiler once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileInvocation {
    pub compiler: PathBuf,
    pub include_dirs: Vec<PathBuf>,
    pub output: PathBuf,
    pub source: PathBuf,
    pub target: BuildTarget,
}

impl CompileInvocation {
    pub fn new(
        compiler: impl Into<PathBuf>,
        include_dirs: Vec<PathBuf>,
        output: impl Into<PathBuf>,
        source: impl Into<PathBuf>,
        target: BuildTarget,
    ) -> Self {
        CompileInvocation {
            compiler: compiler.into(),
            include_dirs,
            output: output.into(),
            source: source.into(),
            target,
        }
    }

    /// Compiler arguments, in order.
    pub fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = self
            .include_dirs
            .iter()
            .map(|dir| format!("-I{}", dir.display()))
            .collect();

        args.push("-o".to_string());
        args.push(self.output.display().to_string());
        args.push(self.source.display().to_string());

        if self.target.is_debug() {
            args.push("-g".to_string());
        }

        args
    }

    /// The process to run, working in `cwd`.
    pub fn to_process(&self, cwd: &Path) -> ProcessBuilder {
        ProcessBuilder::new(&self.compiler)
            .args(self.args())
            .cwd(cwd)
    }
}
