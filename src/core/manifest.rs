//! Manifest parsing.
//!
//! The manifest (`cargo.toml`) is a line-oriented file:
//!
//! ```text
//! [dependencies]
//!   https://github.com/user/libfoo
//!   https://github.com/user/libbar
//! ```
//!
//! The `[dependencies]` header must come first. Each following line carries
//! one dependency identifier with arbitrary leading whitespace. Blank lines
//! and `#` comments are ignored; another `[section]` header ends the list.

use std::path::PathBuf;
use std::sync::LazyLock;

use miette::Diagnostic;
use regex::Regex;
use thiserror::Error;

/// The required first line of every manifest.
pub const DEPENDENCIES_HEADER: &str = "[dependencies]";

/// Leading whitespace followed by exactly one token.
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\S+)\s*$").expect("entry pattern is valid"));

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[[^\]]*\]\s*$").expect("section pattern is valid"));

/// Errors that stop manifest resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("no manifest found at `{path}`")]
    #[diagnostic(
        code(cargo_for_c::manifest::missing),
        help("create `cargo.toml` starting with a `[dependencies]` line, or run `cargo-for-c init`")
    )]
    Missing { path: PathBuf },

    #[error("manifest must begin with `[dependencies]`, found `{found}`")]
    #[diagnostic(
        code(cargo_for_c::manifest::format),
        help("make `[dependencies]` the first line of `cargo.toml`")
    )]
    Format { found: String },

    #[error("failed to read manifest `{path}`")]
    #[diagnostic(code(cargo_for_c::manifest::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A manifest line that is not a single identifier. Reported, then skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: `{text}` is not a single dependency identifier")]
pub struct MalformedEntry {
    /// 1-based line number in the manifest.
    pub line: usize,
    /// The offending line, trimmed.
    pub text: String,
}

/// The parsed manifest: dependency entries in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectManifest {
    entries: Vec<String>,
    malformed: Vec<MalformedEntry>,
}

impl ProjectManifest {
    /// Parse manifest text.
    ///
    /// Fails only when the `[dependencies]` header is absent. Malformed entry
    /// lines are collected in [`malformed`](Self::malformed) and left out of
    /// [`entries`](Self::entries).
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .skip_while(|(_, line)| line.trim().is_empty());

        match lines.next() {
            Some((_, first)) if first.trim() == DEPENDENCIES_HEADER => {}
            Some((_, first)) => {
                return Err(ManifestError::Format {
                    found: first.trim().to_string(),
                })
            }
            None => {
                return Err(ManifestError::Format {
                    found: String::new(),
                })
            }
        }

        let mut manifest = ProjectManifest::default();

        for (line_no, line) in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if SECTION_RE.is_match(line) {
                tracing::debug!(
                    "manifest section `{}` at line {} ends the dependency list",
                    trimmed,
                    line_no
                );
                break;
            }

            match ENTRY_RE.captures(line) {
                Some(caps) => manifest.entries.push(caps[1].to_string()),
                None => {
                    let entry = MalformedEntry {
                        line: line_no,
                        text: trimmed.to_string(),
                    };
                    tracing::debug!("skipping malformed manifest entry: {}", entry);
                    manifest.malformed.push(entry);
                }
            }
        }

        Ok(manifest)
    }

    /// Raw dependency identifiers, in file order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Lines that were skipped as malformed.
    pub fn malformed(&self) -> &[MalformedEntry] {
        &self.malformed
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}

/// Contents written to a freshly scaffolded manifest.
pub fn generate_manifest() -> String {
    format!("{}\n", DEPENDENCIES_HEADER)
}
