use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser)]
#[command(name = "reflectdoc")]
#[command(about = "Generate reference docs from a game engine's reflection dump")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate documentation from a reflection dump
    Generate {
        /// Path to the reflection dump (JSON array of host records)
        dump: PathBuf,

        /// Root entity id or glob pattern (can be repeated)
        #[arg(short, long)]
        root: Vec<String>,

        /// Max traversal depth in edges; 0 documents the roots alone
        #[arg(long)]
        depth: Option<usize>,

        /// Include private and protected members
        #[arg(long)]
        include_private: bool,

        /// Output format: markdown or html
        #[arg(long)]
        format: Option<String>,

        /// Output destination directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file path (defaults to ./reflectdoc.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show or initialize persisted settings
    Settings {
        /// Write a starter config file instead of showing the current one
        #[arg(long)]
        init: bool,

        /// Config file path (defaults to ./reflectdoc.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

impl Args {
    /// Parse arguments from the process command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
