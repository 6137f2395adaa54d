//! Project context supplied fresh on each invocation.
//!
//! Responsibilities:
//! - Carry the open file path, the optional enclosing folder and the project folders.
//! - Answer folder containment questions for environment file resolution.
//!
//! Does NOT handle:
//! - Discovering folders from project files (see `loader`).
//! - Checking whether any of the paths exist on disk.
//!
//! Invariants:
//! - Containment is component-wise: `/proj` contains `/proj/a.py` but not `/proj-other/a.py`.
//! - Project folders keep the order they were listed in.

use std::path::{Path, PathBuf};

/// Read-only view of the file being worked on and the folders around it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectContext {
    /// Path of the currently open file, if any.
    pub open_file_path: Option<PathBuf>,
    /// Folder the open file was opened from, if known.
    pub enclosing_folder: Option<PathBuf>,
    /// Project root folders in listed order.
    pub project_folders: Vec<PathBuf>,
}

impl ProjectContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_open_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.open_file_path = Some(path.into());
        self
    }

    pub fn with_enclosing_folder(mut self, path: impl Into<PathBuf>) -> Self {
        self.enclosing_folder = Some(path.into());
        self
    }

    pub fn with_project_folders<I, P>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.project_folders = folders.into_iter().map(Into::into).collect();
        self
    }

    /// Directory containing the open file.
    ///
    /// Returns `None` when there is no open file or it has no parent component.
    pub fn open_file_dir(&self) -> Option<&Path> {
        self.open_file_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    /// The enclosing folder, if it contains the open file.
    pub fn matching_enclosing_folder(&self) -> Option<&Path> {
        let file = self.open_file_path.as_deref()?;
        self.enclosing_folder
            .as_deref()
            .filter(|folder| folder_contains(folder, file))
    }

    /// The first project folder, in listed order, that contains the open file.
    pub fn matching_project_folder(&self) -> Option<&Path> {
        let file = self.open_file_path.as_deref()?;
        self.project_folders
            .iter()
            .map(PathBuf::as_path)
            .find(|folder| folder_contains(folder, file))
    }
}

/// Component-wise prefix test. An empty folder contains nothing.
fn folder_contains(folder: &Path, file: &Path) -> bool {
    !folder.as_os_str().is_empty() && file.starts_with(folder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_file_dir() {
        let ctx = ProjectContext::new().with_open_file("/proj/src/a.py");
        assert_eq!(ctx.open_file_dir(), Some(Path::new("/proj/src")));

        let bare = ProjectContext::new().with_open_file("a.py");
        assert_eq!(bare.open_file_dir(), None);

        assert_eq!(ProjectContext::new().open_file_dir(), None);
    }

    #[test]
    fn test_enclosing_folder_must_contain_open_file() {
        let ctx = ProjectContext::new()
            .with_open_file("/proj/src/a.py")
            .with_enclosing_folder("/other");
        assert_eq!(ctx.matching_enclosing_folder(), None);

        let ctx = ctx.with_enclosing_folder("/proj");
        assert_eq!(ctx.matching_enclosing_folder(), Some(Path::new("/proj")));
    }

    #[test]
    fn test_project_folder_first_match_wins() {
        let ctx = ProjectContext::new()
            .with_open_file("/proj/src/a.py")
            .with_project_folders(["/elsewhere", "/proj", "/proj/src"]);
        assert_eq!(ctx.matching_project_folder(), Some(Path::new("/proj")));
    }

    #[test]
    fn test_sibling_with_shared_prefix_does_not_match() {
        let ctx = ProjectContext::new()
            .with_open_file("/proj-other/a.py")
            .with_project_folders(["/proj"]);
        assert_eq!(ctx.matching_project_folder(), None);
    }

    #[test]
    fn test_empty_folder_never_matches() {
        let ctx = ProjectContext::new()
            .with_open_file("src/a.py")
            .with_project_folders([""]);
        assert_eq!(ctx.matching_project_folder(), None);
    }
}
