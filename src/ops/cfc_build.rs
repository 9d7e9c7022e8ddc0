//! Implementation of `cargo-for-c build`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use miette::Diagnostic;
use thiserror::Error;

use crate::builder::invocation::CompileInvocation;
use crate::builder::toolchain::find_c_compiler;
use crate::core::materialize::MaterializationMap;
use crate::core::project::{BuildTarget, ProjectContext};
use crate::ops::cfc_fetch::fetch;
use crate::util::config::Config;
use crate::util::fs::{create_dir_idempotent, entry_exists};
use crate::util::process::ProcessRunner;
use crate::util::shell::{Shell, Status};

/// Errors that stop a build.
#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("no C compiler found")]
    #[diagnostic(
        code(cargo_for_c::build::compiler_not_found),
        help("install cc, gcc or clang, set the CC environment variable, or set `build.cc` in `.cargo-for-c/config.toml`")
    )]
    CompilerNotFound,

    #[error("entry point `{path}` does not exist")]
    #[diagnostic(
        code(cargo_for_c::build::missing_entry_point),
        help("every project is compiled from `src/main.c`")
    )]
    MissingEntryPoint { path: PathBuf },

    #[error("compilation failed ({})", describe_exit(.code))]
    #[diagnostic(
        code(cargo_for_c::build::compiler_failed),
        help("the compiler's own diagnostics are printed above")
    )]
    CompilerFailed { code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Options for the build command.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Debug or release
    pub target: BuildTarget,

    /// Skip fetching missing dependencies
    pub offline: bool,
}

/// A finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub binary: PathBuf,
    pub target: BuildTarget,
}

/// Fetch missing dependencies, find a compiler, and compile the project.
///
/// Without a manifest the project has no dependencies. Fetch failures are
/// warnings here; the compiler reports whatever they break.
pub fn build_project(
    ctx: &ProjectContext,
    config: &Config,
    opts: BuildOptions,
    runner: &mut dyn ProcessRunner,
    shell: &Shell,
) -> Result<BuildResult> {
    if opts.offline || config.net.is_offline() {
        tracing::debug!("offline; not fetching dependencies");
    } else if entry_exists(&ctx.manifest_path()) {
        let report = fetch(ctx, config, runner, shell)?;
        if report.has_failures() {
            shell.warn(format!(
                "{} dependencies could not be fetched; building anyway",
                report.failed()
            ));
        }
    } else {
        tracing::debug!("no manifest at {}", ctx.manifest_path().display());
    }

    let compiler =
        find_c_compiler(config.build.cc.as_deref()).ok_or(BuildError::CompilerNotFound)?;
    tracing::debug!(
        "compiler {} (from {})",
        compiler.path.display(),
        compiler.source
    );

    build(ctx, opts.target, &compiler.path, runner, shell)
}

/// Compile the project's entry point with `compiler`.
pub fn build(
    ctx: &ProjectContext,
    target: BuildTarget,
    compiler: &Path,
    runner: &mut dyn ProcessRunner,
    shell: &Shell,
) -> Result<BuildResult> {
    create_dir_idempotent(&ctx.output_dir(target))?;

    let entry = ctx.entry_point();
    if !entry.is_file() {
        return Err(BuildError::MissingEntryPoint { path: entry }.into());
    }

    let map = MaterializationMap::for_project(ctx);
    let binary = ctx.output_binary(target);
    let invocation = CompileInvocation::new(compiler, map.include_dirs(), &binary, entry, target);
    let cmd = invocation.to_process(ctx.root());

    let span = shell.span();
    shell.status(
        Status::Compiling,
        format!("{} ({})", ctx.name(), ctx.root().display()),
    );
    if shell.is_verbose() {
        shell.note(format!("Running `{}`", cmd.display_command()));
    }
    tracing::debug!("running `{}`", cmd.display_command());

    let output = runner
        .status(&cmd)
        .with_context(|| format!("failed to run compiler `{}`", compiler.display()))?;

    shell.json_event(&serde_json::json!({
        "reason": "build-finished",
        "target": target.dir_name(),
        "binary": binary.display().to_string(),
        "success": output.success(),
    }));

    if !output.success() {
        return Err(BuildError::CompilerFailed { code: output.code }.into());
    }

    span.finish_with_message(format!("`{}` target", target.dir_name()));

    Ok(BuildResult { binary, target })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::require_project;
    use crate::test_support::{MockExecutor, MockProcessOutput, ProjectFixture};
    use tempfile::TempDir;

    fn project(tmp: &TempDir) -> ProjectContext {
        let root = ProjectFixture::new("hello").create(tmp.path());
        require_project(&root).unwrap()
    }

    #[test]
    fn test_debug_build_has_debug_flag() {
        let tmp = TempDir::new().unwrap();
        let ctx = project(&tmp);
        let mut exec = MockExecutor::new();
        exec.set_default(MockProcessOutput::success(""));

        let result = build(&ctx, BuildTarget::Debug, Path::new("cc"), &mut exec, &Shell::quiet())
            .unwrap();

        assert_eq!(result.binary, ctx.output_binary(BuildTarget::Debug));
        let args = exec.commands()[0].get_args();
        assert!(args.iter().any(|a| a == "-g"));
        assert!(args.contains(&format!("-I{}", ctx.include_root().display())));
        assert!(args.contains(&ctx.output_binary(BuildTarget::Debug).display().to_string()));
        assert!(ctx.output_dir(BuildTarget::Debug).is_dir());
    }

    #[test]
    fn test_release_build_omits_debug_flag() {
        let tmp = TempDir::new().unwrap();
        let ctx = project(&tmp);
        let mut exec = MockExecutor::new();
        exec.set_default(MockProcessOutput::success(""));

        build(&ctx, BuildTarget::Release, Path::new("cc"), &mut exec, &Shell::quiet()).unwrap();

        let args = exec.commands()[0].get_args();
        assert!(!args.iter().any(|a| a == "-g"));
        assert!(args.contains(&ctx.output_binary(BuildTarget::Release).display().to_string()));
        assert!(ctx.output_dir(BuildTarget::Release).is_dir());
    }

    #[test]
    fn test_output_dir_creation_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let ctx = project(&tmp);
        std::fs::create_dir_all(ctx.output_dir(BuildTarget::Debug)).unwrap();

        let mut exec = MockExecutor::new();
        exec.set_default(MockProcessOutput::success(""));

        build(&ctx, BuildTarget::Debug, Path::new("cc"), &mut exec, &Shell::quiet()).unwrap();
        build(&ctx, BuildTarget::Debug, Path::new("cc"), &mut exec, &Shell::quiet()).unwrap();
        assert_eq!(exec.calls().len(), 2);
    }

    #[test]
    fn test_compiler_failure_is_propagated() {
        let tmp = TempDir::new().unwrap();
        let ctx = project(&tmp);
        let mut exec = MockExecutor::new();
        exec.expect_contains("main.c", MockProcessOutput::failure(1, ""));

        let err = build(&ctx, BuildTarget::Debug, Path::new("cc"), &mut exec, &Shell::quiet())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::CompilerFailed { code: Some(1) })
        ));
    }

    #[test]
    fn test_missing_entry_point() {
        let tmp = TempDir::new().unwrap();
        let root = ProjectFixture::new("hello").without_main().create(tmp.path());
        let ctx = require_project(&root).unwrap();
        let mut exec = MockExecutor::new();

        let err = build(&ctx, BuildTarget::Debug, Path::new("cc"), &mut exec, &Shell::quiet())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::MissingEntryPoint { .. })
        ));
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn test_build_project_fetches_first() {
        let tmp = TempDir::new().unwrap();
        let root = ProjectFixture::new("hello")
            .with_dependencies(&["https://host/lib"])
            .create(tmp.path());
        let ctx = require_project(&root).unwrap();

        let cc = tmp.path().join("fake-cc");
        std::fs::write(&cc, "").unwrap();
        let mut config = Config::default();
        config.build.cc = Some(cc.clone());
        config.net.git = Some(PathBuf::from("git"));

        let mut exec = MockExecutor::new();
        exec.set_default(MockProcessOutput::success(""))
            .create_clone_dirs();

        build_project(&ctx, &config, BuildOptions::default(), &mut exec, &Shell::quiet()).unwrap();

        assert_eq!(exec.calls().len(), 2);
        assert!(exec.calls()[0].starts_with("git clone https://host/lib"));
        assert_eq!(exec.commands()[1].get_program(), cc.as_path());
    }

    #[test]
    fn test_build_project_offline_and_fetch_failure() {
        let tmp = TempDir::new().unwrap();
        let root = ProjectFixture::new("hello")
            .with_dependencies(&["https://host/lib"])
            .create(tmp.path());
        let ctx = require_project(&root).unwrap();

        let cc = tmp.path().join("fake-cc");
        std::fs::write(&cc, "").unwrap();
        let mut config = Config::default();
        config.build.cc = Some(cc);
        config.net.git = Some(PathBuf::from("git"));

        // Offline: only the compiler runs.
        let mut exec = MockExecutor::new();
        exec.set_default(MockProcessOutput::success(""));
        let opts = BuildOptions {
            offline: true,
            ..BuildOptions::default()
        };
        build_project(&ctx, &config, opts, &mut exec, &Shell::quiet()).unwrap();
        assert_eq!(exec.count_containing("clone"), 0);

        // A failed clone does not stop the build.
        let mut exec = MockExecutor::new();
        exec.expect_prefix("git clone", MockProcessOutput::failure(128, "fatal"))
            .set_default(MockProcessOutput::success(""));
        build_project(&ctx, &config, BuildOptions::default(), &mut exec, &Shell::quiet()).unwrap();
        assert_eq!(exec.calls().len(), 2);
    }

    #[test]
    fn test_build_project_without_manifest() {
        let tmp = TempDir::new().unwrap();
        let root = ProjectFixture::new("hello").without_manifest().create(tmp.path());
        let ctx = require_project(&root).unwrap();

        let cc = tmp.path().join("fake-cc");
        std::fs::write(&cc, "").unwrap();
        let mut config = Config::default();
        config.build.cc = Some(cc);

        let mut exec = MockExecutor::new();
        exec.set_default(MockProcessOutput::success(""));
        build_project(&ctx, &config, BuildOptions::default(), &mut exec, &Shell::quiet()).unwrap();

        assert_eq!(exec.calls().len(), 1);
    }
}
