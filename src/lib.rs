//! cmdspec - a declarative command-line test runner
//!
//! Scenarios are YAML documents describing shell commands, optional
//! temporary assets interpolated into them, and the expected exit status
//! and output. This library discovers, runs and reports them.

pub mod cli;
pub mod commands;
pub mod common;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use testing::{Scenario, ScenarioResult, ScenarioRunner};
