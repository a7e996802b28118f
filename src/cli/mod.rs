//! CLI command handling
//!
//! Dispatches CLI commands and formats output. Returns the process exit
//! code instead of exiting, so `main` is the only place that terminates.

use std::path::Path;

use colored::Colorize;

use crate::commands::{Commands, OutputFormat};
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::testing::report::{self, EXIT_ERROR, EXIT_PASSED};
use crate::testing::{load_all, ScenarioRunner, Shell};

/// Dispatch a CLI command and return the exit code
pub fn dispatch(command: Commands) -> i32 {
    let result = match command {
        Commands::Run(args) => run(&args.base, args.verbose, args.format),
        Commands::List { base } => list(&base),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            print_error(&e);
            EXIT_ERROR
        }
    }
}

fn run(base: &Path, verbose: bool, format: OutputFormat) -> Result<i32> {
    let config = Config::load(base)?;
    let scenarios = load_all(base, &config)?;
    let shell = Shell::from_config(&config)?;
    let runner = ScenarioRunner::new(shell, std::env::current_dir()?);

    tracing::debug!(
        count = scenarios.len(),
        shell = %runner_shell(&config),
        working_dir = %runner.working_dir().display(),
        "starting run"
    );

    let results = runner.run_all(&scenarios)?;

    match format {
        OutputFormat::Text => {
            if results.is_empty() {
                println!("{}", "No scenarios found".yellow());
            } else {
                print!("{}", report::render_text(&results, verbose));
            }
        }
        OutputFormat::Json => println!("{}", report::render_json(&results)?),
    }

    Ok(report::exit_code(&results))
}

fn list(base: &Path) -> Result<i32> {
    let config = Config::load(base)?;
    let scenarios = load_all(base, &config)?;

    if scenarios.is_empty() {
        println!("{}", "No scenarios found".yellow());
        return Ok(EXIT_PASSED);
    }

    for scenario in &scenarios {
        let steps = scenario.steps.len();
        println!(
            "{} {} ({} step{})",
            scenario.name.white().bold(),
            scenario.source_path.dimmed(),
            steps,
            if steps == 1 { "" } else { "s" }
        );
    }

    Ok(EXIT_PASSED)
}

fn runner_shell(config: &Config) -> String {
    let mut parts = vec![config.shell.clone()];
    parts.extend(config.shell_args.iter().cloned());
    parts.join(" ")
}

fn print_error(e: &Error) {
    if e.is_authoring() {
        eprintln!("{} {}", "Configuration error:".red().bold(), e);
        eprintln!("{}", "The test suite itself is invalid; no results were reported.".dimmed());
    } else {
        eprintln!("{} {}", "Error:".red().bold(), e);
    }
}
