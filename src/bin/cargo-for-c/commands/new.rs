//! `cargo-for-c new` command

use anyhow::Result;

use crate::cli::NewArgs;
use cargo_for_c::ops::new_project;
use cargo_for_c::util::{GlobalContext, Shell};

pub fn execute(args: NewArgs, gctx: &GlobalContext, shell: &Shell) -> Result<()> {
    let report = new_project(gctx.cwd(), &args.name)?;

    super::report_scaffold(&report, &args.name, shell);

    Ok(())
}
