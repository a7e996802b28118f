//! Scenario runner
//!
//! Executes scenarios strictly in order, one step at a time, waiting for
//! every subprocess before moving on. A failing step never stops the steps
//! after it. Authoring errors (an undeclared placeholder) abort with `Err`.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::assets::MaterializedAssets;
use super::config::{Scenario, Step};
use super::executor::{ProcessOutcome, Shell};
use super::interpolate::interpolate;
use super::verify::{verify, FieldResult};
use crate::common::Result;

/// Result of one executed step
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// The concrete, interpolated command
    pub command: String,
    /// What the command produced
    pub outcome: ProcessOutcome,
    /// One verdict per declared expectation
    pub fields: Vec<FieldResult>,
}

impl StepResult {
    pub fn passed(&self) -> bool {
        self.fields.iter().all(|f| f.passed)
    }
}

/// Result of a test scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub source_path: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub steps: Vec<StepResult>,
}

impl ScenarioResult {
    /// A scenario passes when every field of every step passed
    pub fn passed(&self) -> bool {
        self.steps.iter().all(StepResult::passed)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldResult> {
        self.steps.iter().flat_map(|s| s.fields.iter())
    }
}

/// Runs scenarios with a fixed shell and working directory
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    shell: Shell,
    working_dir: PathBuf,
}

impl ScenarioRunner {
    pub fn new(shell: Shell, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            shell,
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Run every scenario in order
    ///
    /// Stops at the first authoring error; partial results are discarded.
    pub fn run_all(&self, scenarios: &[Scenario]) -> Result<Vec<ScenarioResult>> {
        scenarios.iter().map(|s| self.run(s)).collect()
    }

    /// Run a single scenario
    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioResult> {
        tracing::info!(scenario = %scenario.name, path = %scenario.source_path, "running scenario");

        let assets = MaterializedAssets::materialize(&scenario.assets)?;
        let steps = self.run_steps(scenario, &assets);
        assets.cleanup();
        let steps = steps?;

        let result = ScenarioResult {
            source_path: scenario.source_path.clone(),
            name: scenario.name.clone(),
            description: scenario.description.clone(),
            steps,
        };
        tracing::info!(scenario = %scenario.name, passed = result.passed(), "scenario finished");
        Ok(result)
    }

    fn run_steps(&self, scenario: &Scenario, assets: &MaterializedAssets) -> Result<Vec<StepResult>> {
        let mut results = Vec::with_capacity(scenario.steps.len());
        for (i, step) in scenario.steps.iter().enumerate() {
            let result = self.run_step(step, assets, &scenario.source_path)?;
            tracing::debug!(
                step = i + 1,
                command = %result.command,
                status = result.outcome.status,
                passed = result.passed(),
                "step finished"
            );
            results.push(result);
        }
        Ok(results)
    }

    fn run_step(&self, step: &Step, assets: &MaterializedAssets, context: &str) -> Result<StepResult> {
        let command = interpolate(&step.command, assets, context)?;
        let outcome = self.shell.execute(&command, &self.working_dir)?;
        let fields = verify(&outcome, step.expect.as_ref());
        Ok(StepResult {
            command,
            outcome,
            fields,
        })
    }
}
