//! Settings and project file reading.
//!
//! Responsibilities:
//! - Define settings file errors (`SettingsFileError`).
//! - Read the global settings file (a JSON object of settings).
//! - Read project files (`folders` plus a `settings` object).
//!
//! Does NOT handle:
//! - Choosing which files to read (see `loader`).
//! - Resolving settings across scopes (see `LayeredSettings`).
//!
//! Invariants:
//! - Unknown top-level keys in project files are ignored.
//! - Relative project folder paths are resolved against the project file's directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use super::SettingsScope;

/// Errors that can occur when reading a settings or project file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsFileError {
    #[error("Failed to read settings file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Settings file at {path} must contain a JSON object")]
    NotAnObject { path: PathBuf },
}

/// One entry of a project file's `folders` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectFolder {
    pub path: PathBuf,
}

/// A project file: root folders and project-scoped settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectFile {
    pub folders: Vec<ProjectFolder>,
    pub settings: SettingsScope,
}

impl ProjectFile {
    /// Folder paths, with relative entries anchored at `base_dir`.
    pub fn folder_paths(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.folders
            .iter()
            .map(|folder| {
                if folder.path.is_absolute() {
                    folder.path.clone()
                } else {
                    base_dir.join(&folder.path)
                }
            })
            .collect()
    }
}

fn read_json(path: &Path) -> Result<Value, SettingsFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsFileError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| SettingsFileError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reads a global settings file.
pub fn read_settings_file(path: &Path) -> Result<SettingsScope, SettingsFileError> {
    match read_json(path)? {
        Value::Object(map) => Ok(SettingsScope::from(map)),
        _ => Err(SettingsFileError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Reads a project file.
pub fn read_project_file(path: &Path) -> Result<ProjectFile, SettingsFileError> {
    let value = read_json(path)?;
    if !value.is_object() {
        return Err(SettingsFileError::NotAnObject {
            path: path.to_path_buf(),
        });
    }

    serde_json::from_value(value).map_err(|e| SettingsFileError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
