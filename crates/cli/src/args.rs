//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//! - Parse `--set KEY=VALUE` view overrides.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load settings (see `context` module).

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use replbuild_config::{ENV_PROJECT_FILE, ENV_SETTINGS_PATH};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "replbuild")]
#[command(about = "Launch a Python REPL or pytest session with project settings", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  replbuild repl src/app.py\n  replbuild repl tests/test_app.py --pytest --exit-first\n  replbuild --project-file app.project.json env src/app.py --output json\n  replbuild repl src/app.py --dry-run -- '$replbuild.pythonPath' -X dev -i\n"
)]
pub struct Cli {
    /// Path to the global settings file (overrides the platform default).
    ///
    /// Can also be set via REPLBUILD_SETTINGS_PATH environment variable.
    #[arg(long, global = true, env = ENV_SETTINGS_PATH, value_name = "FILE")]
    pub settings_path: Option<PathBuf>,

    /// Project file listing project folders and project settings.
    ///
    /// Can also be set via REPLBUILD_PROJECT_FILE environment variable.
    #[arg(long, global = true, env = ENV_PROJECT_FILE, value_name = "FILE")]
    pub project_file: Option<PathBuf>,

    /// Folder the file was opened from; checked before the project folders
    #[arg(long, global = true, value_name = "DIR")]
    pub folder: Option<PathBuf>,

    /// Project root folder (repeatable, checked in the order given)
    #[arg(long = "project-folder", global = true, value_name = "DIR")]
    pub project_folders: Vec<PathBuf>,

    /// Override a setting for this invocation (VALUE is a JSON object, array or
    /// boolean, otherwise plain text; numbers stay text)
    #[arg(
        long = "set",
        global = true,
        value_name = "KEY=VALUE",
        value_parser = parse_setting_override
    )]
    pub overrides: Vec<(String, Value)>,

    /// Log settings resolution and launches to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch a REPL (or a pytest session) for a file
    Repl(ReplArgs),

    /// Print the environment a REPL would be launched with
    Env {
        /// File the environment is resolved for
        file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = EnvFormat::Dotenv)]
        output: EnvFormat,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReplArgs {
    /// File to run; appended to the command and used to locate the project
    pub file: Option<PathBuf>,

    /// Run the interpreter through `poetry run`
    #[arg(long)]
    pub poetry: bool,

    /// Start a pytest session for the file instead of a plain REPL
    #[arg(long)]
    pub pytest: bool,

    /// Only collect tests (pytest --collect-only)
    #[arg(long, requires = "pytest")]
    pub collect_only: bool,

    /// Stop at the first failure (pytest --exitfirst)
    #[arg(long, requires = "pytest")]
    pub exit_first: bool,

    /// Update approval files (pytest --approvals-update)
    #[arg(long, requires = "pytest")]
    pub approvals_update: bool,

    /// Do not append the file to the command line
    #[arg(long)]
    pub no_file_arg: bool,

    /// Print the launch request as JSON instead of starting the REPL
    #[arg(long)]
    pub dry_run: bool,

    /// Command replacing the interpreter invocation; `$replbuild.<name>` is substituted
    #[arg(last = true, value_name = "CMD", conflicts_with_all = ["poetry", "pytest"])]
    pub cmd: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvFormat {
    /// KEY=VALUE lines
    Dotenv,
    /// A JSON object
    Json,
}

/// Parse a `KEY=VALUE` override.
///
/// VALUE is read as JSON when it parses to an object, array, boolean or null.
/// Anything else, numbers included, is kept as the literal string, so
/// `--set replbuild.pythonPath=3.11` and `--set replbuild.pythonPath=python3.12`
/// need no quoting.
fn parse_setting_override(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing setting name in '{raw}'"));
    }

    let value = match serde_json::from_str(value) {
        Ok(Value::Number(_)) | Err(_) => Value::String(value.to_string()),
        Ok(parsed) => parsed,
    };
    Ok((key.to_string(), value))
}

/// Returns true if the path is empty or contains only whitespace.
pub(crate) fn path_is_blank(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}
