//! Command-line interface for Ninna.
//!
//! A thin front over the library: one command generates a story from a
//! JSON request file, another prints the effective configuration.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "ninna", version, about = "Bedtime story generation for children")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate one story from a JSON request
    Generate {
        /// Path to the story request JSON, or "-" for stdin
        #[arg(short, long)]
        request: PathBuf,

        /// Write the response JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the configured text provider
        /// (openai, ollama, huggingface, stub)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}
