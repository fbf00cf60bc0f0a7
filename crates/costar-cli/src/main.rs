//! Costar CLI - shortest collaboration paths in a co-occurrence graph.
//!
//! Builds a graph from `id|name` entity/group files plus a
//! `groupId|entityId` membership file, runs BFS from a root entity, and
//! answers "how many hops, and through whom" queries.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod loader;

#[derive(Parser)]
#[command(name = "costar")]
#[command(author = "Costar Contributors")]
#[command(version)]
#[command(about = "Shortest collaboration paths in a co-occurrence graph", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// The three input files every subcommand needs.
#[derive(Args)]
pub(crate) struct InputArgs {
    /// File of `id|name` entity records
    #[arg(long)]
    pub(crate) entities: PathBuf,

    /// File of `id|name` group records
    #[arg(long)]
    pub(crate) groups: PathBuf,

    /// File of `groupId|entityId` membership records
    #[arg(long)]
    pub(crate) memberships: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and answer queries interactively
    Play {
        #[command(flatten)]
        input: InputArgs,

        /// Root entity to measure distances from
        #[arg(long)]
        root: String,
    },

    /// Answer a single query and exit
    Path {
        #[command(flatten)]
        input: InputArgs,

        /// Root entity to measure distances from
        #[arg(long)]
        root: String,

        /// Entity to find a path for
        target: String,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show graph statistics after a build
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Export the graph to JSON
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Output file
        #[arg(short, long, default_value = "costar-graph.json")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Play { input, root } => commands::play(&input, &root),
        Commands::Path {
            input,
            root,
            target,
            json,
        } => commands::path(&input, &root, &target, json),
        Commands::Stats { input } => commands::stats(&input),
        Commands::Export { input, output } => commands::export(&input, &output),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
