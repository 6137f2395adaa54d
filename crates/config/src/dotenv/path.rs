//! Environment file location.
//!
//! Responsibilities:
//! - Decide which filesystem path the configured environment file refers to.
//!
//! Does NOT handle:
//! - Checking that the file exists (see `parse.rs`).
//!
//! Invariants:
//! - Absolute names are returned unchanged, whatever the context.
//! - Relative names are anchored to, in order: the enclosing folder, the first
//!   project folder containing the open file, the open file's directory.
//! - Without an open file a relative name cannot be anchored and `None` is returned.

use std::path::{Path, PathBuf};

use crate::types::ProjectContext;

/// Resolve `configured_name` to a candidate environment file path.
pub fn resolve_path(configured_name: impl AsRef<Path>, context: &ProjectContext) -> Option<PathBuf> {
    let name = configured_name.as_ref();
    if name.is_absolute() {
        return Some(name.to_path_buf());
    }

    let Some(open_file) = context.open_file_path.as_deref() else {
        tracing::warn!(
            env_file = %name.display(),
            "No open file to anchor a relative environment file path"
        );
        return None;
    };

    if let Some(folder) = context.matching_enclosing_folder() {
        tracing::debug!(folder = %folder.display(), "Resolving environment file in enclosing folder");
        return Some(folder.join(name));
    }

    if let Some(folder) = context.matching_project_folder() {
        tracing::debug!(folder = %folder.display(), "Resolving environment file in project folder");
        return Some(folder.join(name));
    }

    let dir = context.open_file_dir().unwrap_or_else(|| Path::new("."));
    tracing::debug!(
        open_file = %open_file.display(),
        dir = %dir.display(),
        "Open file is outside known folders, resolving environment file next to it"
    );
    Some(dir.join(name))
}
