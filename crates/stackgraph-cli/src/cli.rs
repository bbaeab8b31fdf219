//! Command line definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// stackgraph - synthesize the Fargate web service stack
#[derive(Debug, Parser)]
#[command(name = "stackgraph")]
#[command(about = "Synthesize a reproducible Fargate web service deployment")]
#[command(version)]
pub struct Cli {
    /// Dotenv file loaded before the environment is read (default: ./.env when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the Terraform JSON document
    Synth {
        /// Destination file (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Print the resolved configuration as JSON
    Config,

    /// Print the stack outputs and their expressions
    Outputs,

    /// Print the creation order of the declarations
    Graph {
        /// Graphviz DOT instead of the creation order
        #[arg(long)]
        dot: bool,
    },
}
