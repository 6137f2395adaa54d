//! Configuration and environment resolution for ReplBuild.
//!
//! This crate provides the project context, layered settings, placeholder
//! substitution and `.env` discovery used to assemble a REPL launch.

pub mod constants;
pub mod dotenv;
mod loader;
pub mod placeholder;
pub mod settings;
pub mod types;

pub use dotenv::{find_and_load, parse, parse_str, resolve_path};
pub use loader::{
    ConfigError, ENV_PROJECT_FILE, ENV_SETTINGS_PATH, LoadedSettings, SettingsLoader,
    env_var_or_none,
};
pub use placeholder::{KnownSetting, Placeholder, substitute, substitute_all};
pub use settings::{LayeredSettings, ResolvedSetting, SettingSource, SettingsScope};
pub use types::{EnvMap, ProjectContext};
