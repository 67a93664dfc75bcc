//! Upmix CLI - stereo-to-surround decoding of WAV files.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "upmix")]
#[command(author, version, about = "Stereo to surround upmixer", long_about = None)]
struct Cli {
    /// Log pipeline activity at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upmix a stereo WAV file
    Process(commands::process::ProcessArgs),

    /// List speaker layouts and their channel wiring
    Layouts(commands::layouts::LayoutsArgs),

    /// List, inspect, export and save presets
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Layouts(args) => commands::layouts::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
