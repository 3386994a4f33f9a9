//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `analyze`: Run the full key reconciliation and sizing analysis
//! - `unused`: Report catalog keys never referenced from source
//! - `missing`: Report referenced keys absent from the source catalog
//! - `sizing`: Report cross-language size statistics and deviations
//! - `usage`: List the files that reference a given key
//! - `init`: Initialize a keyscope configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::OutputFormat;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all analysis commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Catalogs directory path (overrides config file)
    #[arg(long)]
    pub catalogs_root: Option<PathBuf>,

    /// Source language code (overrides config file)
    #[arg(long)]
    pub source_language: Option<String>,

    /// Ordered language codes; the first is the sizing baseline
    /// (overrides config file)
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Size threshold: absolute character cut for long values and
    /// percentage cut for deviations (overrides config file)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Output format (overrides config file)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the rendered report to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct UsageCommand {
    /// The translation key to look up
    pub key: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full analysis (unused, missing, sizing, recommendations)
    Analyze(CommonArgs),
    /// Report catalog keys never referenced from source code
    Unused(CommonArgs),
    /// Report referenced keys absent from the source-language catalog
    Missing(CommonArgs),
    /// Report cross-language size statistics and deviations
    Sizing(CommonArgs),
    /// List the source files that reference a given key
    Usage(UsageCommand),
    /// Initialize a new .keyscoperc.json configuration file
    Init,
}
