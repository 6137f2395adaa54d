//! Placeholder substitution for custom command arguments.
//!
//! Responsibilities:
//! - Recognise `$replbuild.<name>` tokens anywhere inside an argument.
//! - Resolve each token through the layered settings.
//!
//! Does NOT handle:
//! - Editor-style variables such as `$file` (the CLI passes real paths instead).
//!
//! Invariants:
//! - A token name is the longest run of ASCII alphanumerics and `_` after the prefix.
//! - Known placeholders fall back to their built-in defaults; custom ones must be
//!   defined in some scope.
//! - Every substituted value must be a JSON string, otherwise substitution fails.

use crate::constants::{
    DEFAULT_ENV_FILE, DEFAULT_POETRY_PATH, DEFAULT_PYTHON_PATH, PLACEHOLDER_PREFIX,
    SETTING_ENV_FILE, SETTING_NAMESPACE, SETTING_POETRY_PATH, SETTING_PYTHON_PATH,
};
use crate::loader::ConfigError;
use crate::settings::LayeredSettings;

/// Settings ReplBuild itself knows a default for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownSetting {
    PythonPath,
    PoetryPath,
    EnvFile,
}

impl KnownSetting {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "pythonPath" => Some(KnownSetting::PythonPath),
            "poetryPath" => Some(KnownSetting::PoetryPath),
            "envFile" => Some(KnownSetting::EnvFile),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            KnownSetting::PythonPath => SETTING_PYTHON_PATH,
            KnownSetting::PoetryPath => SETTING_POETRY_PATH,
            KnownSetting::EnvFile => SETTING_ENV_FILE,
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            KnownSetting::PythonPath => DEFAULT_PYTHON_PATH,
            KnownSetting::PoetryPath => DEFAULT_POETRY_PATH,
            KnownSetting::EnvFile => DEFAULT_ENV_FILE,
        }
    }
}

/// A parsed `$replbuild.<name>` token and how to resolve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    /// Resolved through the settings, with a built-in default.
    Known(KnownSetting),
    /// Resolved through the settings only.
    Custom(String),
}

impl Placeholder {
    /// Classify the name following the placeholder prefix.
    pub fn parse(name: &str) -> Self {
        KnownSetting::from_name(name)
            .map(Placeholder::Known)
            .unwrap_or_else(|| Placeholder::Custom(name.to_string()))
    }

    /// Setting key this placeholder reads.
    pub fn key(&self) -> String {
        match self {
            Placeholder::Known(setting) => setting.key().to_string(),
            Placeholder::Custom(name) => format!("{SETTING_NAMESPACE}{name}"),
        }
    }

    /// The token as written in an argument.
    pub fn token(&self) -> String {
        match self {
            Placeholder::Known(setting) => {
                let key = setting.key();
                format!("${key}")
            }
            Placeholder::Custom(name) => format!("{PLACEHOLDER_PREFIX}{name}"),
        }
    }

    /// Resolve the placeholder to its textual value.
    ///
    /// # Errors
    ///
    /// - `ConfigError::UnknownPlaceholder` for a custom name no scope defines.
    /// - `ConfigError::NonTextualSetting` if the value is not a string.
    pub fn resolve(&self, settings: &LayeredSettings) -> Result<String, ConfigError> {
        match self {
            Placeholder::Known(setting) => settings.get_str(setting.key(), setting.default_value()),
            Placeholder::Custom(name) => {
                let key = self.key();
                let resolved = if name.is_empty() {
                    None
                } else {
                    settings.lookup(&key)
                };
                match resolved {
                    Some(resolved) => resolved.as_str().map(str::to_string),
                    None => Err(ConfigError::UnknownPlaceholder {
                        token: self.token(),
                        key,
                    }),
                }
            }
        }
    }
}

/// Replace every placeholder token in `arg`.
pub fn substitute(arg: &str, settings: &LayeredSettings) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(arg.len());
    let mut rest = arg;

    while let Some(start) = rest.find(PLACEHOLDER_PREFIX) {
        out.push_str(&rest[..start]);
        let after = &rest[start + PLACEHOLDER_PREFIX.len()..];
        let name_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());

        let value = Placeholder::parse(&after[..name_len]).resolve(settings)?;
        out.push_str(&value);
        rest = &after[name_len..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Replace placeholder tokens in every argument, stopping at the first failure.
pub fn substitute_all(args: &[String], settings: &LayeredSettings) -> Result<Vec<String>, ConfigError> {
    args.iter().map(|arg| substitute(arg, settings)).collect()
}
