//! Layered settings lookup.
//!
//! Responsibilities:
//! - Hold the project-scoped and global settings as explicit scope objects.
//! - Resolve a setting through project, then global, then a hardcoded default.
//! - Expose typed accessors for the settings the REPL launch needs.
//!
//! Does NOT handle:
//! - Reading settings from disk (see `file.rs` and the `loader` module).
//! - Substituting placeholders in command arguments (see `placeholder`).
//!
//! Invariants:
//! - A JSON `null` is treated the same as a missing key in either scope.
//! - Extra environment variables are only read from the project scope.
//! - Every resolution is logged with the scope it came from.

mod file;
mod path;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{
    DEFAULT_ENV_FILE, DEFAULT_POETRY_PATH, DEFAULT_PYTHON_PATH, SETTING_ENV_FILE,
    SETTING_EXTRA_ENV, SETTING_POETRY_PATH, SETTING_PYTHON_PATH,
};
use crate::loader::ConfigError;
use crate::types::EnvMap;

pub use file::{ProjectFile, ProjectFolder, SettingsFileError, read_project_file, read_settings_file};
pub(crate) use path::default_settings_path;

/// One scope of settings: a JSON object of setting name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsScope(Map<String, Value>);

impl SettingsScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a key, treating `null` as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy every entry of `other` over this scope.
    pub fn overlay(&mut self, other: SettingsScope) {
        self.0.extend(other.0);
    }
}

impl From<Map<String, Value>> for SettingsScope {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Where a resolved setting value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    Project,
    Global,
    Default,
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SettingSource::Project => "project settings",
            SettingSource::Global => "common settings",
            SettingSource::Default => "built-in default",
        };
        f.write_str(label)
    }
}

/// A setting value together with its key and source.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSetting {
    pub key: String,
    pub value: Value,
    pub source: SettingSource,
}

impl ResolvedSetting {
    /// Borrow the value as text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NonTextualSetting` if the value is not a JSON string.
    pub fn as_str(&self) -> Result<&str, ConfigError> {
        self.value
            .as_str()
            .ok_or_else(|| ConfigError::NonTextualSetting {
                key: self.key.clone(),
                kind: json_kind(&self.value),
            })
    }
}

/// Project settings layered over global settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayeredSettings {
    project: SettingsScope,
    global: SettingsScope,
}

impl LayeredSettings {
    pub fn new(project: SettingsScope, global: SettingsScope) -> Self {
        Self { project, global }
    }

    pub fn project(&self) -> &SettingsScope {
        &self.project
    }

    pub fn global(&self) -> &SettingsScope {
        &self.global
    }

    /// Resolve `key` from the project scope, then the global scope.
    ///
    /// Returns `None` when neither scope defines it.
    pub fn lookup(&self, key: &str) -> Option<ResolvedSetting> {
        let (value, source) = if let Some(value) = self.project.get(key) {
            (value, SettingSource::Project)
        } else if let Some(value) = self.global.get(key) {
            (value, SettingSource::Global)
        } else {
            return None;
        };

        tracing::info!(key, value = %value, source = %source, "Using setting");
        Some(ResolvedSetting {
            key: key.to_string(),
            value: value.clone(),
            source,
        })
    }

    /// Resolve `key`, falling back to `default` when no scope defines it.
    pub fn get(&self, key: &str, default: impl Into<Value>) -> ResolvedSetting {
        self.lookup(key).unwrap_or_else(|| {
            let value = default.into();
            tracing::info!(key, value = %value, source = %SettingSource::Default, "Using setting");
            ResolvedSetting {
                key: key.to_string(),
                value,
                source: SettingSource::Default,
            }
        })
    }

    /// Resolve `key` as text, falling back to `default`.
    pub fn get_str(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        self.get(key, default).as_str().map(str::to_string)
    }

    pub fn python_path(&self) -> Result<String, ConfigError> {
        self.get_str(SETTING_PYTHON_PATH, DEFAULT_PYTHON_PATH)
    }

    pub fn poetry_path(&self) -> Result<String, ConfigError> {
        self.get_str(SETTING_POETRY_PATH, DEFAULT_POETRY_PATH)
    }

    pub fn env_file(&self) -> Result<String, ConfigError> {
        self.get_str(SETTING_ENV_FILE, DEFAULT_ENV_FILE)
    }

    /// Extra environment variables from the project scope's `env` object.
    ///
    /// Strings are used verbatim, numbers and booleans are stringified, and
    /// any other value is skipped with a warning.
    pub fn extra_env(&self) -> EnvMap {
        let mut env = EnvMap::new();

        let entries = match self.project.get(SETTING_EXTRA_ENV) {
            None => return env,
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                tracing::warn!(
                    key = SETTING_EXTRA_ENV,
                    kind = json_kind(other),
                    "Ignoring project env setting that is not an object"
                );
                return env;
            }
        };

        for (name, value) in entries {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    tracing::warn!(
                        name = %name,
                        kind = json_kind(other),
                        "Skipping project env entry with non-scalar value"
                    );
                    continue;
                }
            };
            env.insert(name.clone(), value);
        }

        env
    }
}

/// Human-readable name of a JSON value's type.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
