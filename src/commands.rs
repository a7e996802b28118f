//! CLI command definitions
//!
//! Defines the clap commands for cmdspec. Running without a subcommand is
//! the same as `cmdspec run`.

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run every scenario found under the base directory
    Run(RunArgs),

    /// List discovered scenarios without running them
    List {
        /// Base directory containing the scenario directory
        #[arg(default_value = ".")]
        base: PathBuf,
    },
}

impl Commands {
    pub fn verbose(&self) -> bool {
        matches!(self, Commands::Run(RunArgs { verbose: true, .. }))
    }
}

/// Arguments of a test run
#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Base directory containing the scenario directory
    #[arg(default_value = ".")]
    pub base: PathBuf,

    /// Show captured output for every step
    #[arg(long, short)]
    pub verbose: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// How results are printed
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable
    Text,
    /// Machine-readable JSON on stdout
    Json,
}
