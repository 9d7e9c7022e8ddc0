//! `cargo-for-c fetch` command

use anyhow::{bail, Result};

use crate::cli::FetchArgs;
use cargo_for_c::core::require_project;
use cargo_for_c::ops::fetch;
use cargo_for_c::util::{GlobalContext, Shell, SystemRunner};

pub fn execute(_args: FetchArgs, gctx: &GlobalContext, shell: &Shell) -> Result<()> {
    let ctx = require_project(gctx.cwd())?;
    let config = gctx.config_for(ctx.root());

    let span = shell.span();
    let report = fetch(&ctx, &config, &mut SystemRunner, shell)?;

    if report.has_failures() {
        bail!(
            "{} of {} dependencies could not be fetched",
            report.failed(),
            report.records().len()
        );
    }

    span.finish_with_message(format!(
        "{} fetched, {} already present",
        report.fetched(),
        report.fresh()
    ));

    Ok(())
}
