//! Error types for cmdspec
//!
//! Two classes of failure exist. Authoring errors mean the test suite
//! itself is broken (bad documents, undeclared placeholders, bad config) and
//! abort the whole run. Everything else is an environment problem. Failed
//! expectations are not errors at all; they are recorded in the results.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cmdspec
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file '{path}': {reason}")]
    ConfigParse { path: String, reason: String },

    // === Scenario Document Errors ===
    #[error("Scenario directory '{}' not found. Create it or set 'scenario_dir' in cmdspec.toml", .0.display())]
    ScenarioDirMissing(PathBuf),

    #[error("Failed to read scenario '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to parse scenario '{path}': {reason}")]
    ScenarioParse { path: String, reason: String },

    #[error("Invalid scenario '{path}': {reason}")]
    InvalidScenario { path: String, reason: String },

    // === Interpolation Errors ===
    #[error("Unknown asset '{placeholder}' referenced in command '{template}' ({context})")]
    MissingAsset {
        placeholder: String,
        template: String,
        context: String,
    },

    // === Execution Errors ===
    #[error("Failed to materialize asset '{name}': {source}")]
    AssetMaterialize {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Shell '{shell}' not found on PATH")]
    ShellNotFound { shell: String },

    #[error("Failed to invoke shell '{shell}': {source}")]
    ShellSpawn {
        shell: String,
        #[source]
        source: io::Error,
    },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a missing asset error for an unresolved placeholder
    pub fn missing_asset(placeholder: &str, template: &str, context: &str) -> Self {
        Self::MissingAsset {
            placeholder: placeholder.to_string(),
            template: template.to_string(),
            context: context.to_string(),
        }
    }

    /// Create an invalid scenario error
    pub fn invalid_scenario(path: &str, reason: &str) -> Self {
        Self::InvalidScenario {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error means the test suite itself is mis-authored
    ///
    /// Such errors are reported separately from test failures.
    pub fn is_authoring(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::ConfigParse { .. }
                | Error::ScenarioDirMissing(_)
                | Error::ScenarioParse { .. }
                | Error::InvalidScenario { .. }
                | Error::MissingAsset { .. }
        )
    }
}
