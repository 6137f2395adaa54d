//! Error types for configuration loading and resolution.
//!
//! Responsibilities:
//! - Define error variants for settings, placeholder and environment file failures.
//! - Provide conversion from lower-level errors (e.g., SettingsFileError).
//!
//! Does NOT handle:
//! - Missing environment files or unresolvable contexts (logged, never errors).
//! - Malformed `.env` lines (silently skipped by the parser).
//!
//! Invariants:
//! - All error variants include context for debugging (setting names, paths, etc.).
//! - SettingsFileError is converted to ConfigError for unified error handling.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::settings::SettingsFileError;

/// Errors that can occur during configuration loading and resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A `$replbuild.<name>` token names a setting that no scope defines.
    #[error("Unknown placeholder '{token}': no setting named '{key}' in project or global settings")]
    UnknownPlaceholder { token: String, key: String },

    /// A setting resolved to a JSON value that cannot be used as text.
    #[error("Setting '{key}' must be a string, found {kind}")]
    NonTextualSetting { key: String, kind: &'static str },

    #[error("Failed to read environment file at {path}")]
    EnvFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to determine config directory: {0}")]
    ConfigDirUnavailable(String),

    #[error("Failed to read settings file at {path}")]
    SettingsFileRead { path: PathBuf },

    #[error("Failed to parse settings file at {path}")]
    SettingsFileParse { path: PathBuf },

    /// Failed to parse the process `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the process `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    /// Returns true when the error means the launch configuration cannot be
    /// trusted (unknown placeholder or non-textual setting).
    ///
    /// Continuing in this state would start the wrong interpreter or pass the
    /// wrong arguments, so callers must abort the invocation.
    pub fn is_configuration_ambiguous(&self) -> bool {
        matches!(
            self,
            ConfigError::UnknownPlaceholder { .. } | ConfigError::NonTextualSetting { .. }
        )
    }
}

impl From<SettingsFileError> for ConfigError {
    fn from(error: SettingsFileError) -> Self {
        match error {
            SettingsFileError::Read { path, .. } => ConfigError::SettingsFileRead { path },
            SettingsFileError::Parse { path, .. } => ConfigError::SettingsFileParse { path },
            SettingsFileError::NotAnObject { path } => ConfigError::SettingsFileParse { path },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_errors_are_configuration_ambiguous() {
        let unknown = ConfigError::UnknownPlaceholder {
            token: "$replbuild.missing".to_string(),
            key: "replbuild.missing".to_string(),
        };
        let non_text = ConfigError::NonTextualSetting {
            key: "replbuild.pythonPath".to_string(),
            kind: "number",
        };

        assert!(unknown.is_configuration_ambiguous());
        assert!(non_text.is_configuration_ambiguous());
    }

    #[test]
    fn test_io_errors_are_not_configuration_ambiguous() {
        let err = ConfigError::EnvFileRead {
            path: PathBuf::from("/proj/.env"),
            source: std::io::Error::new(ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_configuration_ambiguous());
        assert!(err.to_string().contains("/proj/.env"));
    }

    #[test]
    fn test_settings_file_error_conversion_keeps_path() {
        let err: ConfigError = SettingsFileError::NotAnObject {
            path: PathBuf::from("/etc/replbuild/settings.json"),
        }
        .into();
        match err {
            ConfigError::SettingsFileParse { path } => {
                assert_eq!(path, PathBuf::from("/etc/replbuild/settings.json"));
            }
            other => panic!("expected SettingsFileParse, got {other:?}"),
        }
    }
}
