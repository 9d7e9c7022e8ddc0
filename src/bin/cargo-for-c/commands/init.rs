//! `cargo-for-c init` command

use anyhow::Result;

use crate::cli::InitArgs;
use cargo_for_c::core::project_name;
use cargo_for_c::ops::init_project;
use cargo_for_c::util::{GlobalContext, Shell};

pub fn execute(_args: InitArgs, gctx: &GlobalContext, shell: &Shell) -> Result<()> {
    let report = init_project(gctx.cwd())?;
    let name = project_name(&report.root)?;

    super::report_scaffold(&report, &name, shell);

    Ok(())
}
