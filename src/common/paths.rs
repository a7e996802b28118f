//! Configuration file locations
//!
//! A project config in the base directory wins over the per-user one.

use std::path::{Path, PathBuf};

/// Application name used for the per-user config directory
const APP_NAME: &str = "cmdspec";

/// File name of the project-level configuration
pub const PROJECT_CONFIG_FILE: &str = "cmdspec.toml";

/// Get the per-user configuration directory
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/cmdspec/`
/// - macOS: `~/Library/Application Support/cmdspec/`
/// - Windows: `%APPDATA%\cmdspec\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the per-user configuration file
pub fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the path to the project configuration file for a base directory
pub fn project_config_path(base: &Path) -> PathBuf {
    base.join(PROJECT_CONFIG_FILE)
}
