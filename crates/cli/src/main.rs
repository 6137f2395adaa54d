//! ReplBuild - launch a Python REPL or pytest session with project settings.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Initialize logging on stderr.
//! - Run the selected command and exit with a structured code.
//!
//! Does NOT handle:
//! - Settings resolution or `.env` parsing (see `replbuild_config`).
//! - Command-line assembly (see `repl` module).
//!
//! Invariants:
//! - The process environment is never modified, so the REPL inherits it as-is.
//! - Logs go to stderr so stdout stays clean for `--dry-run` and `env` output.
//! - A launched REPL's exit code becomes the process exit code.

mod args;
mod commands;
mod context;
mod dispatch;
mod error;
mod launcher;
mod repl;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::ExitCodeExt;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "info" } else { "warn" }));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let code = match run_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code().as_i32()
        }
    };

    std::process::exit(code);
}
