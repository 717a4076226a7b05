use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::LayoutStrategy;

#[derive(Parser)]
#[command(
    name = "depscope",
    version,
    about = "Dependency graphs for JavaScript/TypeScript source trees"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Log per-file detail to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build, classify and lay out the import graph of a directory
    Analyze {
        /// Root directory (defaults to the current directory)
        path: Option<PathBuf>,
        /// Layout strategy, overrides the config file
        #[arg(long, value_enum)]
        layout: Option<LayoutStrategy>,
        /// Seed for the force layout
        #[arg(long)]
        seed: Option<u64>,
        /// Config file instead of `<root>/depscope.toml`
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Indent JSON output
        #[arg(long)]
        pretty: bool,
        /// Translate positions so this file sits at the canvas centre
        #[arg(long, value_name = "FILE")]
        focus: Option<PathBuf>,
    },
    /// Per-file structure metrics
    Metrics {
        /// File to measure
        #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
        file: Option<PathBuf>,
        /// Read the file text from stdin
        #[arg(long)]
        stdin: bool,
        /// File name used for heuristics when reading stdin
        #[arg(long, default_value = "stdin.tsx")]
        name: String,
        #[arg(long)]
        pretty: bool,
    },
}
