//! Expectation verification
//!
//! The received text is trimmed before comparison; the expected text is
//! used exactly as declared. Comparison is plain equality.

use std::fmt;

use serde::Serialize;

use super::config::Expectations;
use super::executor::ProcessOutcome;

/// Outcome field an expectation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Status,
    Stdout,
    Stderr,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Status => "status",
            Field::Stdout => "stdout",
            Field::Stderr => "stderr",
        };
        f.write_str(name)
    }
}

/// An expected or received field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Status(i32),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Status(code) => write!(f, "{}", code),
            FieldValue::Text(text) => write!(f, "{:?}", text),
        }
    }
}

/// Verdict for one expected field of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldResult {
    pub field: Field,
    pub passed: bool,
    pub expected: FieldValue,
    pub received: FieldValue,
}

impl FieldResult {
    fn new(field: Field, expected: FieldValue, received: FieldValue) -> Self {
        Self {
            field,
            passed: expected == received,
            expected,
            received,
        }
    }
}

/// Compare an outcome against the declared expectations
///
/// Results come back in `status`, `stdout`, `stderr` order, one per
/// declared field. No expectations means no results.
pub fn verify(outcome: &ProcessOutcome, expectations: Option<&Expectations>) -> Vec<FieldResult> {
    let Some(expect) = expectations else {
        return Vec::new();
    };

    let mut results = Vec::new();

    if let Some(status) = expect.status {
        results.push(FieldResult::new(
            Field::Status,
            FieldValue::Status(status),
            FieldValue::Status(outcome.status),
        ));
    }
    if let Some(stdout) = &expect.stdout {
        results.push(FieldResult::new(
            Field::Stdout,
            FieldValue::Text(stdout.clone()),
            FieldValue::Text(outcome.stdout.trim().to_string()),
        ));
    }
    if let Some(stderr) = &expect.stderr {
        results.push(FieldResult::new(
            Field::Stderr,
            FieldValue::Text(stderr.clone()),
            FieldValue::Text(outcome.stderr.trim().to_string()),
        ));
    }

    results
}
