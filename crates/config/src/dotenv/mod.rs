//! Project environment file discovery and parsing.
//!
//! Responsibilities:
//! - Locate the environment file relevant to the open file (`resolve_path`).
//! - Parse `KEY=VALUE` files into an `EnvMap` (`parse`, `parse_str`).
//! - Combine both steps for callers that only want the mapping (`find_and_load`).
//!
//! Does NOT handle:
//! - Loading ReplBuild's own `.env` into the process environment (see
//!   `SettingsLoader::load_dotenv`, which uses `dotenvy`).
//! - Merging project `env` settings over the parsed values (see the CLI crate).
//!
//! Invariants:
//! - Missing files and unanchored relative names degrade to an empty map.
//! - Only I/O failures on an existing file are returned as errors.

mod parse;
mod path;

use std::path::Path;

pub use parse::{parse, parse_str};
pub use path::resolve_path;

use crate::loader::ConfigError;
use crate::types::{EnvMap, ProjectContext};

/// Resolve `configured_name` against `context` and parse the file found there.
///
/// Returns an empty map when the name cannot be resolved or the file does not exist.
pub fn find_and_load(
    configured_name: impl AsRef<Path>,
    context: &ProjectContext,
) -> Result<EnvMap, ConfigError> {
    match resolve_path(configured_name, context) {
        Some(path) => parse(&path),
        None => Ok(EnvMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_and_load_unresolved_is_empty() {
        let env = find_and_load(".env", &ProjectContext::new()).unwrap();
        assert!(env.is_empty());
    }

    #[test]
    fn test_find_and_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::new()
            .with_open_file(temp_dir.path().join("src").join("a.py"))
            .with_project_folders([temp_dir.path()]);

        let env = find_and_load(".env", &ctx).unwrap();
        assert!(env.is_empty());
    }

    #[test]
    fn test_find_and_load_reads_project_folder_file() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(
            temp_dir.path().join(".env"),
            "FOO=bar\n# comment\nBAZ=\"q=1\"\n",
        )
        .unwrap();
        // A nearer file must not be picked up when a project folder matches.
        fs::write(src.join(".env"), "FOO=nearer\n").unwrap();

        let ctx = ProjectContext::new()
            .with_open_file(src.join("a.py"))
            .with_project_folders([temp_dir.path()]);

        let env = find_and_load(".env", &ctx).unwrap();
        assert_eq!(env.len(), 2);
        assert_eq!(env["FOO"], "bar");
        assert_eq!(env["BAZ"], "q=1");
    }
}
