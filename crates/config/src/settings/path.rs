//! Path helpers for the global settings file location.
//!
//! Responsibilities:
//! - Determine the platform configuration path of the global settings file.
//! - Use `directories` crate for platform-appropriate paths.
//!
//! Does NOT handle:
//! - File I/O operations.

use std::path::PathBuf;

use anyhow::Context;

use crate::constants::{APP_NAME, SETTINGS_FILE_NAME};

/// Returns the default path to the global settings file.
///
/// - Linux: `~/.config/replbuild/settings.json`
/// - macOS: `~/Library/Application Support/replbuild/settings.json`
/// - Windows: `%AppData%\replbuild\config\settings.json`
pub(crate) fn default_settings_path() -> Result<PathBuf, anyhow::Error> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join(SETTINGS_FILE_NAME))
}
