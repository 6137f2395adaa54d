//! REPL command-line and environment construction.
//!
//! Responsibilities:
//! - Build the interpreter command line from launch options and settings.
//! - Merge the project `.env` file with project `env` settings.
//! - Assemble the `LaunchRequest` handed to a launcher.
//!
//! Does NOT handle:
//! - Parsing CLI flags (see `args`).
//! - Starting processes (see `launcher`).
//!
//! Invariants:
//! - The open file, when given, is always the last argument.
//! - Project `env` settings override values from the `.env` file.
//! - Placeholder failures abort construction; nothing is launched.

use std::path::{Path, PathBuf};

use replbuild_config::constants::{DEFAULT_ENCODING, DEFAULT_EXTERNAL_ID};
use replbuild_config::{ConfigError, EnvMap, LayeredSettings, ProjectContext, find_and_load, substitute_all};

use crate::launcher::LaunchRequest;

/// How the REPL should be started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplOptions {
    /// Run the interpreter through `poetry run`.
    pub poetry: bool,
    /// Start a pytest session instead of a plain REPL.
    pub pytest: bool,
    pub collect_only: bool,
    pub exit_first: bool,
    pub approvals_update: bool,
    /// Replaces the interpreter invocation; may contain placeholders.
    pub custom_cmd: Option<Vec<String>>,
    /// Appended as the final argument.
    pub open_file: Option<String>,
}

/// Build the command line for `options`.
pub fn build_command(
    options: &ReplOptions,
    settings: &LayeredSettings,
) -> Result<Vec<String>, ConfigError> {
    let mut cmd = match &options.custom_cmd {
        Some(custom) => substitute_all(custom, settings)?,
        None => interpreter_command(options, settings)?,
    };

    if let Some(file) = options.open_file.as_deref().filter(|f| !f.is_empty()) {
        cmd.push(file.to_string());
    }

    Ok(cmd)
}

fn interpreter_command(
    options: &ReplOptions,
    settings: &LayeredSettings,
) -> Result<Vec<String>, ConfigError> {
    let python = settings.python_path()?;
    let mut cmd = if options.poetry {
        vec![settings.poetry_path()?, "run".to_string(), python]
    } else {
        vec![python]
    };
    cmd.push("-i".to_string());

    if options.pytest {
        cmd.extend(["-m", "pytest", "-vvv", "-s"].map(String::from));
        if options.collect_only {
            cmd.push("--collect-only".to_string());
        }
        if options.exit_first {
            cmd.push("--exitfirst".to_string());
        }
        if options.approvals_update {
            cmd.push("--approvals-update".to_string());
        }
    }

    Ok(cmd)
}

/// Environment for the REPL: the project `.env` file overlaid with `env` settings.
pub fn build_environment(
    context: &ProjectContext,
    settings: &LayeredSettings,
) -> Result<EnvMap, ConfigError> {
    let env_file = settings.env_file()?;
    let mut env = find_and_load(&env_file, context)?;
    env.extend(settings.extra_env());
    Ok(env)
}

/// Assemble the full launch request.
pub fn build_launch_request(
    options: &ReplOptions,
    context: &ProjectContext,
    settings: &LayeredSettings,
) -> Result<LaunchRequest, ConfigError> {
    let cmd = build_command(options, settings)?;
    let env = build_environment(context, settings)?;
    let cwd = context
        .open_file_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(LaunchRequest {
        cmd,
        cwd,
        encoding: DEFAULT_ENCODING.to_string(),
        external_id: DEFAULT_EXTERNAL_ID.to_string(),
        env,
    })
}
