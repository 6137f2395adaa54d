//! Invocation context for command execution.
//!
//! Responsibilities:
//! - Load layered settings from the global settings file, the project file and `--set` overrides.
//! - Read settings locations from the working directory's `.env`.
//! - Build the `ProjectContext` from the file argument, `--folder` and the project folders.
//!
//! Does NOT handle:
//! - CLI argument definitions (see `args` module).
//! - Reading project `.env` files for the REPL (done per command through `replbuild_config`).
//!
//! Invariants:
//! - All context paths are absolute so folder containment compares like with like.
//! - Folders from `--project-folder` come before the project file's folders.
//! - A `.env` that cannot be parsed is skipped with a warning; its contents never reach the REPL.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use replbuild_config::{LayeredSettings, ProjectContext, SettingsLoader, SettingsScope};

use crate::args::{Cli, path_is_blank};

/// Everything a command needs to know about the project it runs in.
#[derive(Debug, Clone, Default)]
pub(crate) struct InvocationContext {
    pub(crate) settings: LayeredSettings,
    pub(crate) project: ProjectContext,
}

impl InvocationContext {
    /// Load settings and build the project context for `file`.
    pub(crate) fn load(cli: &Cli, file: Option<&Path>) -> Result<Self> {
        // The working directory is often a project root whose .env belongs to
        // the REPL, so a file dotenvy rejects is skipped rather than fatal
        let mut loader = match SettingsLoader::new().load_dotenv() {
            Ok(loader) => loader,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping .env in the working directory");
                SettingsLoader::new()
            }
        };

        // Blank values are ignored so an empty env var does not clobber the default
        if let Some(path) = cli.settings_path.as_ref().filter(|p| !path_is_blank(p)) {
            loader = loader.with_settings_path(path.clone());
        }
        if let Some(path) = cli.project_file.as_ref().filter(|p| !path_is_blank(p)) {
            loader = loader.with_project_file(path.clone());
        }
        if !cli.overrides.is_empty() {
            let mut view = SettingsScope::new();
            for (key, value) in &cli.overrides {
                view.insert(key.clone(), value.clone());
            }
            loader = loader.with_view_settings(view);
        }

        let loaded = loader
            .from_env()
            .build()
            .context("Failed to load settings")?;

        let mut folders = cli
            .project_folders
            .iter()
            .map(|folder| absolute(folder))
            .collect::<Result<Vec<_>>>()?;
        for folder in &loaded.project_folders {
            folders.push(absolute(folder)?);
        }

        let mut project = ProjectContext::new().with_project_folders(folders);
        if let Some(file) = file {
            project = project.with_open_file(absolute(file)?);
        }
        if let Some(folder) = cli.folder.as_deref() {
            project = project.with_enclosing_folder(absolute(folder)?);
        }

        tracing::debug!(
            open_file = ?project.open_file_path,
            enclosing_folder = ?project.enclosing_folder,
            project_folders = ?project.project_folders,
            "Built project context"
        );

        Ok(Self {
            settings: loaded.settings,
            project,
        })
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("Failed to make path absolute: {}", path.display()))
}
