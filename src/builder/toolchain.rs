//! C compiler discovery.
//!
//! Searched in this order:
//! 1. `build.cc` from configuration
//! 2. The `CC` environment variable
//! 3. `cc`, `gcc`, `clang` on `PATH`

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::util::process::find_executable;

/// Compilers tried on `PATH`, in order.
const PATH_CANDIDATES: &[&str] = &["cc", "gcc", "clang"];

/// Where a compiler was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerSource {
    Config,
    Env,
    Path,
}

impl fmt::Display for CompilerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilerSource::Config => f.write_str("config"),
            CompilerSource::Env => f.write_str("CC"),
            CompilerSource::Path => f.write_str("PATH"),
        }
    }
}

/// A C compiler to invoke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CCompiler {
    pub path: PathBuf,
    pub source: CompilerSource,
}

/// Find a C compiler, reading `CC` from the process environment.
pub fn find_c_compiler(configured: Option<&Path>) -> Option<CCompiler> {
    find_c_compiler_with(configured, std::env::var_os("CC"))
}

/// Find a C compiler with an explicit `CC` value.
pub fn find_c_compiler_with(
    configured: Option<&Path>,
    env_cc: Option<OsString>,
) -> Option<CCompiler> {
    if let Some(cc) = configured {
        match resolve_program(cc) {
            Some(path) => {
                tracing::debug!("using configured compiler {}", path.display());
                return Some(CCompiler {
                    path,
                    source: CompilerSource::Config,
                });
            }
            None => tracing::warn!("Configured C compiler not found: {}", cc.display()),
        }
    }

    if let Some(cc) = env_cc.filter(|cc| !cc.is_empty()) {
        let cc = PathBuf::from(cc);
        let path = resolve_program(&cc).unwrap_or(cc);
        tracing::debug!("using compiler from CC: {}", path.display());
        return Some(CCompiler {
            path,
            source: CompilerSource::Env,
        });
    }

    PATH_CANDIDATES.iter().find_map(|name| {
        find_executable(name).map(|path| {
            tracing::debug!("found {} at {}", name, path.display());
            CCompiler {
                path,
                source: CompilerSource::Path,
            }
        })
    })
}

/// An existing path as-is, or a bare program name looked up on `PATH`.
fn resolve_program(program: &Path) -> Option<PathBuf> {
    if program.exists() {
        return Some(program.to_path_buf());
    }
    if program.components().count() == 1 {
        return find_executable(&program.to_string_lossy());
    }
    None
}
