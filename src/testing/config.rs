//! Test scenario configuration types
//!
//! `ScenarioDocument` mirrors what authors write in YAML, including the
//! legacy single-step `command`/`expect` shorthand. It is normalized right
//! away into `Scenario`, the only shape the runner ever sees.

use serde::{Deserialize, Deserializer, Serialize};

use crate::common::{Error, Result};

/// A scenario document as written in a YAML file
///
/// Unknown top-level keys are ignored so documents can carry extra
/// metadata; steps and expectations stay strict.
#[derive(Deserialize, Debug, Default)]
pub struct ScenarioDocument {
    /// Name of the test scenario
    pub name: Option<String>,
    /// Optional description of what the test verifies
    pub description: Option<String>,
    /// Display path override; defaults to the file location
    pub path: Option<String>,
    /// Assets available for interpolation
    pub assets: Option<Vec<Asset>>,
    /// Legacy single-step command
    pub command: Option<String>,
    /// Legacy single-step expectations
    pub expect: Option<Expectations>,
    /// The sequence of steps to execute
    pub steps: Option<Vec<Step>>,
}

/// Kind of a declared asset
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Inline text, substituted double-quoted
    String,
    /// Temporary file, substituted by its path
    File,
}

/// A named piece of data available to step commands
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Asset {
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub name: String,
    #[serde(default)]
    pub content: String,
}

impl Asset {
    /// Create an inline string asset
    pub fn string(name: &str, content: &str) -> Self {
        Self {
            kind: AssetKind::String,
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    /// Create a file asset
    pub fn file(name: &str, content: &str) -> Self {
        Self {
            kind: AssetKind::File,
            name: name.to_string(),
            content: content.to_string(),
        }
    }
}

/// Expected outcome of a step; absent fields are not checked
///
/// A field written without a value (`stdout:`) is rejected rather than
/// silently left unchecked. Use `stdout: ""` to expect empty output.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Expectations {
    /// Expected exit status
    #[serde(default, deserialize_with = "non_null")]
    pub status: Option<i32>,
    /// Expected standard output (compared against the trimmed capture)
    #[serde(default, deserialize_with = "non_null")]
    pub stdout: Option<String>,
    /// Expected standard error (compared against the trimmed capture)
    #[serde(default, deserialize_with = "non_null")]
    pub stderr: Option<String>,
}

/// Deserialize a present field, refusing null
fn non_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(<D::Error as serde::de::Error>::custom(
            "expectation has no value; remove the key to leave it unchecked",
        )),
    }
}

impl Expectations {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.stdout.is_none() && self.stderr.is_none()
    }
}

/// One command plus optional expectations
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Command template, may contain `{asset}` placeholders
    pub command: String,
    /// Optional expectations for the command outcome
    #[serde(default)]
    pub expect: Option<Expectations>,
}

impl Step {
    pub fn new(command: &str, expect: Option<Expectations>) -> Self {
        Self {
            command: command.to_string(),
            expect,
        }
    }
}

/// A validated, normalized scenario ready to run
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Originating document location, used for display and error context
    pub source_path: String,
    /// Assets in declared order
    pub assets: Vec<Asset>,
    /// Steps in declared order; never empty
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Normalize a parsed document into a runnable scenario
    ///
    /// `steps` wins over the legacy `command`/`expect` pair. A document
    /// without a name or without any executable command is rejected.
    pub fn from_document(doc: ScenarioDocument, source_path: &str) -> Result<Self> {
        let source_path = doc.path.unwrap_or_else(|| source_path.to_string());

        let name = match doc.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(Error::invalid_scenario(&source_path, "missing 'name'")),
        };

        let steps = match doc.steps {
            Some(steps) => steps,
            None => match doc.command {
                Some(command) => vec![Step {
                    command,
                    expect: doc.expect,
                }],
                None => {
                    return Err(Error::invalid_scenario(
                        &source_path,
                        "missing 'command' or 'steps'",
                    ))
                }
            },
        };

        if steps.is_empty() {
            return Err(Error::invalid_scenario(&source_path, "'steps' is empty"));
        }
        if let Some(i) = steps.iter().position(|s| s.command.trim().is_empty()) {
            return Err(Error::invalid_scenario(
                &source_path,
                &format!("step {} has an empty 'command'", i + 1),
            ));
        }

        let assets = doc.assets.unwrap_or_default();
        if let Some(asset) = assets.iter().find(|a| a.name.is_empty()) {
            return Err(Error::invalid_scenario(
                &source_path,
                &format!("asset with content {:?} has an empty 'name'", asset.content),
            ));
        }

        Ok(Self {
            name,
            description: doc.description,
            source_path,
            assets,
            steps,
        })
    }
}
