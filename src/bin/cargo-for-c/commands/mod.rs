//! Command implementations

pub mod build;
pub mod fetch;
pub mod init;
pub mod new;

use cargo_for_c::ops::ScaffoldReport;
use cargo_for_c::util::shell::{Shell, Status};

/// Print what scaffolding did, then the one-line summary.
fn report_scaffold(report: &ScaffoldReport, name: &str, shell: &Shell) {
    for warning in &report.warnings {
        shell.warn(warning);
    }

    if shell.is_verbose() {
        for path in &report.created {
            shell.status(Status::Created, path.display());
        }
        for path in &report.existing {
            shell.status(Status::Skipped, format!("{} (already exists)", path.display()));
        }
    }

    shell.status(
        Status::Created,
        format!("project `{}` at {}", name, report.root.display()),
    );
    shell.json_event(&serde_json::json!({
        "reason": "project-created",
        "name": name,
        "root": report.root.display().to_string(),
        "created": report.created.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
    }));
}
