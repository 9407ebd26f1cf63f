//! CLI command definitions and handlers.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub mod branches;
pub mod completions;
pub mod graph;
pub mod utils;

/// refgraph - a repository's branches and history, drawn in the terminal.
#[derive(Parser)]
#[command(name = "refgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log engine activity to stderr (overrides REFGRAPH_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show local branches as a tree grouped by path segment.
    #[command(alias = "br")]
    Branches {
        /// Also show remote-tracking branches.
        #[arg(short, long)]
        remotes: bool,

        /// Also show tags.
        #[arg(short, long)]
        tags: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show history as colored lanes, newest first.
    #[command(alias = "log")]
    Graph {
        /// Limit the number of commits walked.
        #[arg(short = 'n', long = "max-count")]
        max_count: Option<usize>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}
