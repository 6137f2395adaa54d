//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//! - Load the invocation context for commands that need one.
//! - Choose the process launcher for `repl`.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Mapping errors to exit codes (see `main()` and `error`).
//!
//! Invariants:
//! - `completions` never reads settings files.
//! - The returned code is the launched REPL's own exit code when one ran.

use std::io;

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::context::InvocationContext;
use crate::error::ExitCode;
use crate::launcher::{DryRunLauncher, LaunchOutcome, SubprocessLauncher};

/// Dispatch CLI commands to their respective handlers.
///
/// Returns the process exit code on success.
pub(crate) fn run_command(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::Repl(args) => {
            let invocation = InvocationContext::load(cli, args.file.as_deref())?;
            let outcome: LaunchOutcome = if args.dry_run {
                commands::repl::run(args, &invocation, &DryRunLauncher::new(io::stdout()))?
            } else {
                commands::repl::run(args, &invocation, &SubprocessLauncher)?
            };
            Ok(outcome
                .exit_code
                .unwrap_or(ExitCode::GeneralError.as_i32()))
        }
        Commands::Env { file, output } => {
            let invocation = InvocationContext::load(cli, file.as_deref())?;
            commands::env::run(*output, &invocation, &mut io::stdout().lock())?;
            Ok(ExitCode::Success.as_i32())
        }
        Commands::Completions { shell } => {
            commands::completions::run(*shell, &mut io::stdout().lock())?;
            Ok(ExitCode::Success.as_i32())
        }
    }
}
