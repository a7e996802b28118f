//! Scenario execution engine
//!
//! Reads YAML scenarios, materializes their assets, runs each step's
//! command through a shell and checks the outcome against the declared
//! expectations.

mod assets;
mod config;
mod discovery;
mod executor;
mod interpolate;
pub mod report;
mod runner;
mod verify;

pub use assets::{MaterializedAsset, MaterializedAssets};
pub use config::*;
pub use discovery::{discover, load_all, load_scenario};
pub use executor::{ProcessOutcome, Shell};
pub use interpolate::interpolate;
pub use runner::{ScenarioResult, ScenarioRunner, StepResult};
pub use verify::{verify, Field, FieldResult, FieldValue};
