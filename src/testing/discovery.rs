//! Scenario discovery and loading
//!
//! Walks the scenario directory, parses each YAML document and normalizes
//! it. Any invalid document aborts loading.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::config::{Scenario, ScenarioDocument};
use crate::common::config::Config;
use crate::common::{Error, Result};

/// Find scenario files under `<base>/<scenario_dir>`, sorted by path
pub fn discover(base: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let root = config.scenario_root(base);
    if !root.is_dir() {
        return Err(Error::ScenarioDirMissing(root));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root) {
        let entry = entry.map_err(|e| Error::FileRead {
            path: e
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| root.display().to_string()),
            error: e.to_string(),
        })?;
        if entry.file_type().is_file() && config.is_scenario_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    tracing::debug!(root = %root.display(), count = files.len(), "discovered scenario files");
    Ok(files)
}

/// Load and normalize a single scenario file
///
/// `base` is only used to shorten the displayed source path.
pub fn load_scenario(path: &Path, base: &Path) -> Result<Scenario> {
    let display = display_path(path, base);

    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: display.clone(),
        error: e.to_string(),
    })?;

    let doc: ScenarioDocument = serde_yaml::from_str(&content).map_err(|e| Error::ScenarioParse {
        path: display.clone(),
        reason: e.to_string(),
    })?;

    Scenario::from_document(doc, &display)
}

/// Discover and load every scenario for a base directory
pub fn load_all(base: &Path, config: &Config) -> Result<Vec<Scenario>> {
    discover(base, config)?
        .iter()
        .map(|path| load_scenario(path, base))
        .collect()
}

fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
