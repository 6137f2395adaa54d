//! Environment variable parsing for settings locations.
//!
//! Responsibilities:
//! - Read the environment variables that point at settings and project files.
//! - Apply them to a SettingsLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Reading the files themselves (see builder.rs).
//! - .env file loading (handled by SettingsLoader::load_dotenv).
//!
//! Invariants:
//! - Builder values take precedence over environment variables.
//! - Real environment variables take precedence over values read from `.env`.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).

use std::path::PathBuf;

use super::builder::SettingsLoader;

/// Prefix of the variables ReplBuild reads from its own `.env`.
pub(crate) const ENV_PREFIX: &str = "REPLBUILD_";

/// Environment variable naming the global settings file.
pub const ENV_SETTINGS_PATH: &str = "REPLBUILD_SETTINGS_PATH";

/// Environment variable naming the project file.
pub const ENV_PROJECT_FILE: &str = "REPLBUILD_PROJECT_FILE";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Read `key` from the environment, then from the loader's `.env` values.
fn location_var(loader: &SettingsLoader, key: &str) -> Option<PathBuf> {
    env_var_or_none(key)
        .or_else(|| {
            loader
                .dotenv_var(key)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
        .map(PathBuf::from)
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut SettingsLoader) {
    if loader.settings_path().is_none()
        && let Some(path) = location_var(loader, ENV_SETTINGS_PATH)
    {
        loader.set_settings_path(Some(path));
    }
    if loader.project_file().is_none()
        && let Some(path) = location_var(loader, ENV_PROJECT_FILE)
    {
        loader.set_project_file(Some(path));
    }
}
