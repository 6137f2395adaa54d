//! Centralized constants for the ReplBuild workspace.
//!
//! This module contains setting keys and default values used across crates
//! to avoid string duplication.

// =============================================================================
// Setting Keys & Defaults
// =============================================================================

/// Setting naming the Python interpreter used to start the REPL.
pub const SETTING_PYTHON_PATH: &str = "replbuild.pythonPath";

/// Interpreter used when no scope configures one.
pub const DEFAULT_PYTHON_PATH: &str = "python3.11";

/// Setting naming the poetry executable used for `--poetry` launches.
pub const SETTING_POETRY_PATH: &str = "replbuild.poetryPath";

/// Poetry executable used when no scope configures one.
pub const DEFAULT_POETRY_PATH: &str = "poetry";

/// Setting naming the environment file, absolute or relative to a project folder.
pub const SETTING_ENV_FILE: &str = "replbuild.envFile";

/// Environment file name used when no scope configures one.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Project-scoped object of extra environment variables.
///
/// Entries here override values loaded from the environment file.
pub const SETTING_EXTRA_ENV: &str = "env";

// =============================================================================
// Placeholders
// =============================================================================

/// Prefix of placeholder tokens substituted in custom command arguments.
pub const PLACEHOLDER_PREFIX: &str = "$replbuild.";

/// Namespace prepended to a placeholder name to form its setting key.
pub const SETTING_NAMESPACE: &str = "replbuild.";

// =============================================================================
// Launch Defaults
// =============================================================================

/// Encoding requested for the REPL's standard streams.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Identifier attached to launched REPL sessions.
pub const DEFAULT_EXTERNAL_ID: &str = "REPL";

// =============================================================================
// File Locations
// =============================================================================

/// Application name used for platform configuration directories.
pub const APP_NAME: &str = "replbuild";

/// File name of the global settings file inside the configuration directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";
