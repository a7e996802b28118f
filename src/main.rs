//! cmdspec - a declarative command-line test runner
//!
//! Runs YAML-described shell scenarios and exits non-zero when any
//! expectation fails.

use clap::Parser;
use cmdspec::commands::{Commands, RunArgs};
use cmdspec::{cli, common::logging};

#[derive(Parser)]
#[command(name = "cmdspec", about = "Declarative command-line test runner")]
#[command(version, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run(cli.run));

    logging::init_cli(command.verbose());

    let code = cli::dispatch(command);
    std::process::exit(code);
}
