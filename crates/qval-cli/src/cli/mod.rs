use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use qval_config::QvalConfig;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `qval` binary.
#[derive(Debug, Parser)]
#[command(
    name = "qval",
    version,
    about = "qval - analytical method validation tracker"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, text (defaults to `general.default_format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra config file layered over `.qval/config.toml`
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolve global flags, falling back to configuration defaults.
    pub fn global_flags(&self, config: &QvalConfig) -> anyhow::Result<GlobalFlags> {
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_str(&config.general.default_format, true)
                .map_err(|error| anyhow::anyhow!("general.default_format: {error}"))?,
        };
        Ok(GlobalFlags { format })
    }
}
