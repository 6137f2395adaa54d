//! `.env` file parsing.
//!
//! Responsibilities:
//! - Read an environment file and turn `KEY=VALUE` lines into an `EnvMap`.
//!
//! Does NOT handle:
//! - Locating the file (see `path.rs`).
//! - Variable expansion, escape sequences, inline comments or multi-line values.
//!
//! Invariants:
//! - Parsing never fails on content; malformed lines are skipped one by one.
//! - A missing file yields an empty map; only other I/O failures are errors.
//! - Skipped lines are never logged verbatim, since they may hold secrets.

use std::io::ErrorKind;
use std::path::Path;

use crate::loader::ConfigError;
use crate::types::EnvMap;

/// Parse the environment file at `path`.
///
/// A file that does not exist is not an error: it is reported at warn level
/// and an empty map is returned.
///
/// # Errors
///
/// Returns `ConfigError::EnvFileRead` if the file exists but cannot be read
/// as UTF-8 text.
pub fn parse(path: &Path) -> Result<EnvMap, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Environment file does not exist");
            return Ok(EnvMap::new());
        }
        Err(source) => {
            return Err(ConfigError::EnvFileRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let env = parse_str(&content);
    tracing::debug!(path = %path.display(), count = env.len(), "Parsed environment file");
    Ok(env)
}

/// Parse `.env` formatted text.
pub fn parse_str(content: &str) -> EnvMap {
    let mut env = EnvMap::new();

    for (index, line) in content.lines().enumerate() {
        match parse_line(line) {
            Some((key, value)) => {
                env.insert(key.to_string(), value.to_string());
            }
            None => {
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    tracing::trace!(line = index + 1, "Skipping malformed environment line");
                }
            }
        }
    }

    env
}

/// Split one line into a trimmed key and unquoted value.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some((key, strip_quotes(value.trim())))
}

/// Remove one matching pair of outer `"` or `'` quotes.
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}
