//! Tessera CLI: plan FFmpeg filter graphs for recorded sessions.
//!
//! Usage:
//!   tessera plan <MANIFEST>       Print the filter graph for a session
//!   tessera validate <MANIFEST>   Check a session manifest
//!   tessera info <MANIFEST>       Show media, participants and segments
//!   tessera init <NAME>           Create an empty session

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tessera_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "tessera",
    about = "Composite multi-participant recordings into FFmpeg filter graphs",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the filter graph for a session
    Plan {
        /// Path to manifest.json or its session directory
        manifest: PathBuf,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full FFmpeg argument list instead of the graph
        #[arg(long)]
        args: bool,

        /// Render target used in the argument list
        #[arg(long, default_value = "output.mp4")]
        target: PathBuf,
    },

    /// Validate a session manifest
    Validate {
        /// Path to manifest.json or its session directory
        manifest: PathBuf,
    },

    /// Show session information
    Info {
        /// Path to manifest.json or its session directory
        manifest: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new empty session
    Init {
        /// Session name
        name: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Canvas width
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Canvas height
        #[arg(long, default_value = "720")]
        height: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    tessera_common::logging::init_cli_logging(&config.logging, cli.verbose);

    match cli.command {
        Commands::Plan {
            manifest,
            output,
            args,
            target,
        } => commands::plan::run(manifest, output, args, target, &config).await,
        Commands::Validate { manifest } => commands::validate::run(manifest),
        Commands::Info { manifest, json } => commands::info::run(manifest, json, &config),
        Commands::Init {
            name,
            output,
            width,
            height,
        } => commands::init::run(name, output, width, height),
    }
}
