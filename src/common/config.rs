//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::{project_config_path, user_config_path};
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory (relative to the base directory) searched for scenarios
    #[serde(default = "default_scenario_dir")]
    pub scenario_dir: PathBuf,

    /// File extensions treated as scenario documents
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Shell interpreter used to run step commands
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Arguments placed between the shell and the command string
    #[serde(default = "default_shell_args")]
    pub shell_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scenario_dir: default_scenario_dir(),
            extensions: default_extensions(),
            shell: default_shell(),
            shell_args: default_shell_args(),
        }
    }
}

fn default_scenario_dir() -> PathBuf {
    PathBuf::from("cmdspec")
}

fn default_extensions() -> Vec<String> {
    vec!["yml".to_string(), "yaml".to_string()]
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_shell_args() -> Vec<String> {
    vec!["-c".to_string()]
}

impl Config {
    /// Load configuration for a base directory
    ///
    /// Looks for `<base>/cmdspec.toml`, then the per-user config file.
    /// Returns default configuration if neither exists.
    pub fn load(base: &Path) -> Result<Self> {
        let project = project_config_path(base);
        if project.exists() {
            return Self::load_file(&project);
        }

        if let Some(path) = user_config_path() {
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from an explicit file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.shell.trim().is_empty() {
            return Err(Error::Config("'shell' must not be empty".to_string()));
        }
        if self.extensions.is_empty() {
            return Err(Error::Config(
                "'extensions' must list at least one file extension".to_string(),
            ));
        }
        Ok(())
    }

    /// Absolute scenario directory for a base directory
    pub fn scenario_root(&self, base: &Path) -> PathBuf {
        base.join(&self.scenario_dir)
    }

    /// Whether a path has one of the configured scenario extensions
    pub fn is_scenario_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.trim_start_matches('.') == ext))
            .unwrap_or(false)
    }
}
