//! Suite aggregation and report rendering

use std::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;

use super::runner::{ScenarioResult, StepResult};
use super::verify::FieldResult;
use crate::common::Result;

/// Exit code when every expectation passed
pub const EXIT_PASSED: i32 = 0;
/// Exit code when at least one expectation failed
pub const EXIT_FAILED: i32 = 1;
/// Exit code for authoring and configuration errors
pub const EXIT_ERROR: i32 = 2;

/// Pass/fail totals for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub scenarios: usize,
    pub scenarios_passed: usize,
    pub assertions: usize,
    pub assertions_passed: usize,
}

impl Summary {
    pub fn from_results(results: &[ScenarioResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.scenarios += 1;
            if result.passed() {
                summary.scenarios_passed += 1;
            }
            for field in result.fields() {
                summary.assertions += 1;
                if field.passed {
                    summary.assertions_passed += 1;
                }
            }
        }
        summary
    }

    pub fn passed(&self) -> bool {
        self.assertions == self.assertions_passed
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            EXIT_PASSED
        } else {
            EXIT_FAILED
        }
    }
}

/// Exit code for a completed run: 0 iff every field result passed
pub fn exit_code(results: &[ScenarioResult]) -> i32 {
    Summary::from_results(results).exit_code()
}

/// Render results as human-readable text
///
/// With `verbose`, captured output is shown for every step, not only for
/// failing ones.
pub fn render_text(results: &[ScenarioResult], verbose: bool) -> String {
    let mut out = String::new();

    for result in results {
        let _ = writeln!(
            out,
            "\n{} {} {}",
            "Running Test:".blue().bold(),
            result.name.white().bold(),
            format!("({})", result.source_path).dimmed()
        );
        if let Some(desc) = &result.description {
            let _ = writeln!(out, "  {}", desc.dimmed());
        }

        for (i, step) in result.steps.iter().enumerate() {
            render_step(&mut out, i + 1, step, verbose);
        }

        if result.passed() {
            let _ = writeln!(out, "{} {}", "✓".green().bold(), "Test Passed".green().bold());
        } else {
            let _ = writeln!(out, "{} {}", "✗".red().bold(), "Test Failed".red().bold());
        }
    }

    let summary = Summary::from_results(results);
    let line = format!(
        "{}/{} scenarios passed, {}/{} assertions passed",
        summary.scenarios_passed, summary.scenarios, summary.assertions_passed, summary.assertions
    );
    if summary.passed() {
        let _ = writeln!(out, "\n{}", line.green().bold());
    } else {
        let _ = writeln!(out, "\n{}", line.red().bold());
    }

    out
}

fn render_step(out: &mut String, step_num: usize, step: &StepResult, verbose: bool) {
    let mark = if step.passed() { "✓".green() } else { "✗".red() };
    let _ = writeln!(out, "  {} Step {}: {}", mark, step_num, step.command.dimmed());

    for field in &step.fields {
        render_field(out, field);
    }

    if verbose || !step.passed() {
        let _ = writeln!(out, "      status: {}", step.outcome.status);
        for (label, text) in [("stdout", &step.outcome.stdout), ("stderr", &step.outcome.stderr)] {
            if !text.is_empty() {
                let _ = writeln!(out, "      {}: {}", label, text.trim_end().dimmed());
            }
        }
    }
}

fn render_field(out: &mut String, field: &FieldResult) {
    if field.passed {
        let _ = writeln!(out, "    {} {}", "✓".green(), field.field);
    } else {
        let _ = writeln!(
            out,
            "    {} {}: expected {}, received {}",
            "✗".red(),
            field.field,
            field.expected.to_string().green(),
            field.received.to_string().red()
        );
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    scenarios: &'a [ScenarioResult],
    summary: Summary,
}

/// Render results and totals as pretty-printed JSON
pub fn render_json(results: &[ScenarioResult]) -> Result<String> {
    let report = JsonReport {
        scenarios: results,
        summary: Summary::from_results(results),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
