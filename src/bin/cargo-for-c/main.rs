//! cargo-for-c CLI - A minimal Cargo-like project manager for C

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cargo_for_c::util::diagnostic::{emit, Diagnostic};
use cargo_for_c::util::{GlobalContext, Shell};

mod cli;
mod commands;

use cli::{Cli, Commands, MessageFormat};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => std::process::exit(0),
                _ => std::process::exit(1),
            }
        }
    };

    let shell = Shell::from_flags(
        cli.quiet,
        cli.verbose,
        cli.color_choice(),
        cli.message_format == MessageFormat::Json,
    );

    init_logging(&cli);

    if let Err(e) = run(cli, &shell) {
        if shell.is_json() {
            shell.error(format!("{:#}", e));
        } else {
            emit(&Diagnostic::from_error(&e), shell.use_color());
        }
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let default = if cli.verbose {
        "cargo_for_c=debug"
    } else if cli.quiet {
        "cargo_for_c=error"
    } else {
        "cargo_for_c=warn"
    };
    let filter =
        EnvFilter::try_from_env("CARGO_FOR_C_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli, shell: &Shell) -> Result<()> {
    let gctx = GlobalContext::new()?;

    match cli.command {
        Commands::Init(args) => commands::init::execute(args, &gctx, shell),
        Commands::New(args) => commands::new::execute(args, &gctx, shell),
        Commands::Build(args) => commands::build::execute(args, &gctx, shell),
        Commands::Fetch(args) => commands::fetch::execute(args, &gctx, shell),
    }
}
