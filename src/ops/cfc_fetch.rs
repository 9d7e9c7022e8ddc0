//! Implementation of `cargo-for-c fetch`.
//!
//! Each declared dependency is materialized under the include root at
//! `<include_root>/<local key>`. Presence of any filesystem entry there is the
//! only "already fetched" signal. Dependencies are processed one at a time in
//! manifest order, and a failed clone never stops the rest of the batch.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::materialize::MaterializationMap;
use crate::core::project::ProjectContext;
use crate::core::DependencyIdentifier;
use crate::ops::resolve::resolve_for;
use crate::sources::GitSource;
use crate::util::config::Config;
use crate::util::fs::{create_dir_idempotent, entry_exists};
use crate::util::process::ProcessRunner;
use crate::util::shell::{Shell, Status};

/// A clone that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// Exit code of the clone; `None` if git could not be run or was killed.
    pub code: Option<i32>,
    /// Captured diagnostic output.
    pub stderr: String,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "clone exited with status {}", code),
            None => f.write_str("clone did not run to completion"),
        }
    }
}

impl std::error::Error for FetchFailure {}

/// What happened to one dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Something already existed at the slot; nothing was run.
    Fresh,
    /// Cloned successfully.
    Fetched,
    /// The clone was attempted and failed.
    Failed(FetchFailure),
    /// An earlier entry with a different identifier owns the same slot.
    Collision { with: DependencyIdentifier },
    /// The slot belongs to a local alias such as `crate-root`.
    Reserved { alias: String },
    /// The local key is empty or leaves the include root.
    Invalid,
}

/// The result for one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRecord {
    pub id: DependencyIdentifier,
    pub slot: PathBuf,
    pub outcome: FetchOutcome,
}

impl FetchRecord {
    /// Whether this dependency was left unmaterialized because of an error.
    ///
    /// A collision is not an error: the slot is served by the earlier entry.
    pub fn is_failure(&self) -> bool {
        matches!(
            self.outcome,
            FetchOutcome::Failed(_) | FetchOutcome::Reserved { .. } | FetchOutcome::Invalid
        )
    }
}

/// One record per manifest entry, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    records: Vec<FetchRecord>,
}

impl FetchReport {
    pub fn records(&self) -> &[FetchRecord] {
        &self.records
    }

    pub fn has_failures(&self) -> bool {
        self.records.iter().any(FetchRecord::is_failure)
    }

    pub fn failed(&self) -> usize {
        self.records.iter().filter(|r| r.is_failure()).count()
    }

    pub fn fetched(&self) -> usize {
        self.count(|o| matches!(o, FetchOutcome::Fetched))
    }

    pub fn fresh(&self) -> usize {
        self.count(|o| matches!(o, FetchOutcome::Fresh))
    }

    fn count(&self, pred: impl Fn(&FetchOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Resolve the project's manifest and fetch everything it declares.
///
/// Malformed manifest lines are reported as warnings.
pub fn fetch(
    ctx: &ProjectContext,
    config: &Config,
    runner: &mut dyn ProcessRunner,
    shell: &Shell,
) -> Result<FetchReport> {
    let resolution = resolve_for(ctx)?;
    for entry in &resolution.malformed {
        shell.warn(format!("{}: {}", resolution.manifest_path.display(), entry));
    }

    let map = MaterializationMap::for_project(ctx);
    let git = GitSource::discover(config.net.git.as_deref());
    fetch_dependencies(&map, &resolution.dependencies, &git, runner, shell)
}

/// Materialize `deps` under the include root of `map`.
///
/// Only a failure to create the include root itself is an `Err`; every
/// per-dependency problem becomes a record in the report.
pub fn fetch_dependencies(
    map: &MaterializationMap,
    deps: &[DependencyIdentifier],
    git: &GitSource,
    runner: &mut dyn ProcessRunner,
    shell: &Shell,
) -> Result<FetchReport> {
    create_dir_idempotent(map.include_root())?;

    let pending = deps.iter().filter(|d| !entry_exists(&map.slot(d))).count();
    let progress = shell.progress(pending as u64, "Fetching dependencies");

    // normalized local key -> first identifier that claimed it
    let mut claimed: HashMap<PathBuf, &DependencyIdentifier> = HashMap::new();
    let mut records = Vec::with_capacity(deps.len());

    for id in deps {
        let slot = map.slot(id);

        let outcome = if !id.is_contained_key() {
            FetchOutcome::Invalid
        } else if let Some(alias) = map.reserved_by(id) {
            FetchOutcome::Reserved {
                alias: alias.to_string(),
            }
        } else {
            match claimed.get(&id.key_path()) {
                Some(first) if *first != id => FetchOutcome::Collision {
                    with: (*first).clone(),
                },
                _ => {
                    claimed.entry(id.key_path()).or_insert(id);
                    if entry_exists(&slot) {
                        FetchOutcome::Fresh
                    } else {
                        progress.suspend(|| shell.status(Status::Fetching, id));
                        let outcome = clone_one(git, runner, id, &slot);
                        progress.inc(1);
                        outcome
                    }
                }
            }
        };

        let record = FetchRecord {
            id: id.clone(),
            slot,
            outcome,
        };
        progress.suspend(|| report_record(shell, &record));
        records.push(record);
    }

    progress.finish();
    Ok(FetchReport { records })
}

fn clone_one(
    git: &GitSource,
    runner: &mut dyn ProcessRunner,
    id: &DependencyIdentifier,
    slot: &Path,
) -> FetchOutcome {
    match git.clone_into(runner, id.as_str(), slot) {
        Ok(output) if output.success() => FetchOutcome::Fetched,
        Ok(output) => FetchOutcome::Failed(FetchFailure {
            code: output.code,
            stderr: output.stderr,
        }),
        Err(e) => {
            tracing::debug!("clone of {} did not run: {:#}", id, e);
            FetchOutcome::Failed(FetchFailure {
                code: None,
                stderr: format!("{:#}", e),
            })
        }
    }
}

fn report_record(shell: &Shell, record: &FetchRecord) {
    let id = record.id.as_str();
    let path = record.slot.display().to_string();

    match &record.outcome {
        FetchOutcome::Fresh => {
            if shell.is_verbose() {
                shell.status(Status::Fresh, id);
            }
            shell.json_event(&serde_json::json!({
                "reason": "dependency-fresh",
                "id": id,
                "path": path,
            }));
        }
        FetchOutcome::Fetched => {
            shell.status(Status::Fetched, format!("{} ({})", id, path));
            shell.json_event(&serde_json::json!({
                "reason": "dependency-fetched",
                "id": id,
                "path": path,
            }));
        }
        FetchOutcome::Failed(failure) => {
            shell.status(Status::Error, format!("failed to fetch `{}`: {}", id, failure));
            shell.block(failure.stderr.trim_end());
            shell.json_event(&serde_json::json!({
                "reason": "dependency-failed",
                "id": id,
                "path": path,
                "code": failure.code,
                "stderr": failure.stderr,
            }));
        }
        FetchOutcome::Collision { with } => {
            shell.warn(format!(
                "`{}` shares its local path with `{}`; keeping `{}`",
                id, with, with
            ));
            shell.json_event(&serde_json::json!({
                "reason": "dependency-skipped",
                "id": id,
                "path": path,
                "cause": format!("collides with {}", with),
            }));
        }
        FetchOutcome::Reserved { alias } => {
            shell.status(
                Status::Error,
                format!("`{}` would be placed in the reserved `{}` alias", id, alias),
            );
            shell.json_event(&serde_json::json!({
                "reason": "dependency-failed",
                "id": id,
                "path": path,
                "code": null,
                "stderr": format!("reserved alias `{}`", alias),
            }));
        }
        FetchOutcome::Invalid => {
            shell.status(
                Status::Error,
                format!("`{}` does not name a location inside the include root", id),
            );
            shell.json_event(&serde_json::json!({
                "reason": "dependency-failed",
                "id": id,
                "path": path,
                "code": null,
                "stderr": "invalid local path",
            }));
        }
    }
}
