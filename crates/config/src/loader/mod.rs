//! Settings loader for environment variables and files.
//!
//! Responsibilities:
//! - Load ReplBuild's own `.env`, environment variables, the global settings
//!   file and the project file.
//! - Provide a builder-pattern `SettingsLoader` for layered settings.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Resolving individual setting values (see `settings`).
//! - Project `.env` files handed to the REPL (see `dotenv`).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before the `.env` file is opened.
//! - Loading `.env` never changes the process environment.

mod builder;
mod env;
mod error;

#[cfg(test)]
mod tests;

pub use builder::{LoadedSettings, SettingsLoader};
pub use env::{ENV_PROJECT_FILE, ENV_SETTINGS_PATH, env_var_or_none};
pub use error::ConfigError;
