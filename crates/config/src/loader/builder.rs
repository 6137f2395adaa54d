//! Settings loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `SettingsLoader` for layered settings.
//! - Support file locations from environment variables and direct builder methods.
//! - Build the final `LoadedSettings` from the global settings file and project file.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Project file parsing (delegated to `settings::read_project_file`).
//! - Parsing project `.env` files (see `dotenv`).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - View settings take precedence over project file settings, which take
//!   precedence over the global settings file.
//! - A missing global settings file is not an error; a missing project file is.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before the `.env` file is opened.
//! - `load_dotenv()` never mutates the process environment; only `REPLBUILD_*`
//!   keys are kept, and only `from_env()` reads them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::env::{ENV_PREFIX, apply_env};
use super::error::ConfigError;
use crate::settings::{
    LayeredSettings, SettingsScope, default_settings_path, read_project_file, read_settings_file,
};

/// File `load_dotenv()` reads, relative to the working directory.
const PROCESS_DOTENV_FILE: &str = ".env";

/// Settings resolved for one invocation.
#[derive(Debug, Clone, Default)]
pub struct LoadedSettings {
    /// Project settings layered over global settings.
    pub settings: LayeredSettings,
    /// Folders listed by the project file, anchored at its directory.
    pub project_folders: Vec<PathBuf>,
}

/// Loader that builds layered settings from files and environment variables.
#[derive(Debug, Default)]
pub struct SettingsLoader {
    settings_path: Option<PathBuf>,
    project_file: Option<PathBuf>,
    view_settings: SettingsScope,
    /// `REPLBUILD_*` entries read from the working directory's `.env`.
    dotenv_vars: HashMap<String, String>,
}

impl SettingsLoader {
    /// Create a new settings loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Read `REPLBUILD_*` variables from the working directory's `.env` file if present.
    ///
    /// Parent directories are not searched. Other keys in the file are ignored
    /// and the process environment is left untouched, so nothing read here
    /// reaches a launched REPL. The values are consulted by `from_env()` after
    /// real environment variables.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be read (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(mut self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        let entries = match dotenvy::from_path_iter(Path::new(PROCESS_DOTENV_FILE)) {
            Ok(entries) => entries,
            Err(e) if Self::is_not_found(&e) => return Ok(self),
            Err(e) => return Err(Self::map_dotenv_error(e)),
        };

        for entry in entries {
            let (key, value) = entry.map_err(Self::map_dotenv_error)?;
            if key.starts_with(ENV_PREFIX) {
                self.dotenv_vars.insert(key, value);
            }
        }

        tracing::debug!(count = self.dotenv_vars.len(), "Read settings locations from .env");
        Ok(self)
    }

    fn map_dotenv_error(err: dotenvy::Error) -> ConfigError {
        match err {
            dotenvy::Error::LineParse(_, idx) => ConfigError::DotenvParse { error_index: idx },
            dotenvy::Error::Io(io_err) => ConfigError::DotenvIo {
                kind: io_err.kind(),
            },
            _ => ConfigError::DotenvUnknown,
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Override the global settings file path.
    pub fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = Some(path);
        self
    }

    /// Read project folders and project-scoped settings from this file.
    pub fn with_project_file(mut self, path: PathBuf) -> Self {
        self.project_file = Some(path);
        self
    }

    /// Overlay settings on top of the project file's settings.
    pub fn with_view_settings(mut self, settings: SettingsScope) -> Self {
        self.view_settings.overlay(settings);
        self
    }

    /// Read file locations from environment variables.
    ///
    /// Values already set through builder methods are kept.
    pub fn from_env(mut self) -> Self {
        apply_env(&mut self);
        self
    }

    pub(crate) fn settings_path(&self) -> Option<&PathBuf> {
        self.settings_path.as_ref()
    }

    pub(crate) fn set_settings_path(&mut self, path: Option<PathBuf>) {
        self.settings_path = path;
    }

    /// A `REPLBUILD_*` value read by `load_dotenv()`.
    pub(crate) fn dotenv_var(&self, key: &str) -> Option<&str> {
        self.dotenv_vars.get(key).map(String::as_str)
    }

    pub(crate) fn project_file(&self) -> Option<&PathBuf> {
        self.project_file.as_ref()
    }

    pub(crate) fn set_project_file(&mut self, path: Option<PathBuf>) {
        self.project_file = path;
    }

    /// Build the layered settings.
    ///
    /// # Errors
    ///
    /// - `ConfigError::ConfigDirUnavailable` if no settings path was given and
    ///   the platform config directory cannot be determined.
    /// - `ConfigError::SettingsFileRead`/`SettingsFileParse` if an existing
    ///   settings file or the configured project file cannot be read.
    pub fn build(self) -> Result<LoadedSettings, ConfigError> {
        let global = load_global(self.settings_path)?;

        let (mut project, project_folders) = match self.project_file {
            Some(path) => {
                let file = read_project_file(&path)?;
                let base_dir = path
                    .parent()
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                tracing::debug!(
                    path = %path.display(),
                    folders = file.folders.len(),
                    "Loaded project file"
                );
                let folders = file.folder_paths(base_dir);
                (file.settings, folders)
            }
            None => (SettingsScope::new(), Vec::new()),
        };
        project.overlay(self.view_settings);

        Ok(LoadedSettings {
            settings: LayeredSettings::new(project, global),
            project_folders,
        })
    }
}

fn load_global(explicit: Option<PathBuf>) -> Result<SettingsScope, ConfigError> {
    let is_explicit = explicit.is_some();
    let path = match explicit {
        Some(path) => path,
        None => default_settings_path().map_err(|e| ConfigError::ConfigDirUnavailable(e.to_string()))?,
    };

    if !path.exists() {
        if is_explicit {
            tracing::warn!(path = %path.display(), "Settings file does not exist, using defaults");
        } else {
            tracing::debug!(path = %path.display(), "No global settings file");
        }
        return Ok(SettingsScope::new());
    }

    let scope = read_settings_file(&path)?;
    tracing::debug!(path = %path.display(), "Loaded global settings");
    Ok(scope)
}
