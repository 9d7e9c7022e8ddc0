//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};

use cargo_for_c::util::shell::ColorChoice;

/// cargo-for-c - A minimal Cargo-like project manager for C
#[derive(Parser)]
#[command(name = "cargo-for-c")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Use verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print only errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Disable colored output (same as --color never)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format for status messages
    #[arg(long, global = true, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective color choice after `--no-color`.
    pub fn color_choice(&self) -> ColorChoice {
        if self.no_color {
            ColorChoice::Never
        } else {
            self.color
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a project in the current directory
    Init(InitArgs),

    /// Create a new project directory and initialize it
    New(NewArgs),

    /// Fetch missing dependencies, then compile the project
    Build(BuildArgs),

    /// Fetch the dependencies listed in cargo.toml
    Fetch(FetchArgs),
}

#[derive(Args)]
pub struct InitArgs {}

#[derive(Args)]
pub struct NewArgs {
    /// Project name (also the directory name)
    pub name: String,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Build in release mode (no debug symbols)
    #[arg(short, long)]
    pub release: bool,

    /// Do not fetch missing dependencies first
    #[arg(long)]
    pub offline: bool,
}

#[derive(Args)]
pub struct FetchArgs {}
