//! Dependency sources.

pub mod git;

pub use git::GitSource;
