//! Dependency identifiers.
//!
//! An identifier is an opaque, usually protocol-qualified, source location
//! such as `https://github.com/user/libfoo`. Its *local key* is the same
//! string with any leading `scheme://` removed; the key decides where the
//! dependency lives under the include root. Identifiers that differ only in
//! scheme therefore share one local slot.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A fetchable dependency source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyIdentifier(String);

impl DependencyIdentifier {
    pub fn new(raw: impl Into<String>) -> Self {
        DependencyIdentifier(raw.into())
    }

    /// The identifier exactly as declared.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The protocol-stripped form used for on-disk placement.
    pub fn local_key(&self) -> &str {
        strip_protocol(&self.0)
    }

    /// The local key as a relative path, with `.` segments and trailing
    /// separators dropped. Spellings of the same location compare equal.
    pub fn key_path(&self) -> PathBuf {
        Path::new(self.local_key())
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }

    /// Whether the local key stays inside the directory it is joined onto.
    pub fn is_contained_key(&self) -> bool {
        let key = self.local_key();
        !key.is_empty()
            && Path::new(key)
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    }
}

impl fmt::Display for DependencyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DependencyIdentifier {
    fn from(raw: String) -> Self {
        DependencyIdentifier(raw)
    }
}

impl From<&str> for DependencyIdentifier {
    fn from(raw: &str) -> Self {
        DependencyIdentifier(raw.to_string())
    }
}

/// Remove a leading `scheme://` from `raw`.
///
/// The scheme must match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
/// Anything else passes through unchanged.
pub fn strip_protocol(raw: &str) -> &str {
    let Some((scheme, rest)) = raw.split_once("://") else {
        return raw;
    };

    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if valid {
        rest
    } else {
        raw
    }
}
