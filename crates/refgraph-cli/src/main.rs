//! refgraph CLI - branch trees and a lane-drawn commit graph.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod render;

use commands::{Cli, Commands};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "REFGRAPH_LOG";

fn main() {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Branches {
            remotes,
            tags,
            json,
        } => commands::branches::run(remotes, tags, json),
        Commands::Graph { max_count, json } => commands::graph::run(max_count, json),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `REFGRAPH_LOG` (default `warn`).
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Only fails if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
