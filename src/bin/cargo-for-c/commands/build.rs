//! `cargo-for-c build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use cargo_for_c::core::{require_project, BuildTarget};
use cargo_for_c::ops::{build_project, BuildOptions};
use cargo_for_c::util::shell::Status;
use cargo_for_c::util::{GlobalContext, Shell, SystemRunner};

pub fn execute(args: BuildArgs, gctx: &GlobalContext, shell: &Shell) -> Result<()> {
    let ctx = require_project(gctx.cwd())?;
    let config = gctx.config_for(ctx.root());

    let opts = BuildOptions {
        target: BuildTarget::from_release_flag(args.release),
        offline: args.offline,
    };

    let result = build_project(&ctx, &config, opts, &mut SystemRunner, shell)?;

    if shell.is_verbose() {
        shell.status(Status::Info, format!("binary at {}", result.binary.display()));
    }

    Ok(())
}
