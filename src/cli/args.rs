//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

/// Recursively subdivided disc: split regions by point, rebalance by weight
#[derive(Parser, Debug)]
#[command(name = "otcirc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply events as they arrive and report each outcome
    Play {
        /// Event script (default: stdin, also `-`)
        #[arg(value_hint = ValueHint::FilePath)]
        script: Option<PathBuf>,
        /// Write the final frame as SVG
        #[arg(long, value_hint = ValueHint::FilePath)]
        svg: Option<PathBuf>,
        /// Print the final structure as a tree
        #[arg(long)]
        tree: bool,
    },

    /// Replay events silently and emit the final frame
    Render {
        /// Event script (default: stdin, also `-`)
        #[arg(value_hint = ValueHint::FilePath)]
        script: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = RenderFormat::Svg)]
        format: RenderFormat,
        /// Output file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    /// SVG document
    Svg,
    /// One draw command per line
    Commands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Print a commented config template
    Template,
}
