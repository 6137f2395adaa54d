//! REPL command implementation.
//!
//! Responsibilities:
//! - Turn `repl` arguments into `ReplOptions`.
//! - Build the launch request and hand it to the injected launcher.
//!
//! Does NOT handle:
//! - Choosing the launcher (see `dispatch`).
//! - Command-line assembly rules (see `crate::repl`).
//!
//! Invariants:
//! - Nothing is launched when the request cannot be built.
//! - The open file is passed to the interpreter byte for byte; paths that are
//!   not valid UTF-8 are rejected instead of being rewritten.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::args::ReplArgs;
use crate::context::InvocationContext;
use crate::launcher::{LaunchOutcome, ProcessLauncher};
use crate::repl::{ReplOptions, build_launch_request};

pub fn run(
    args: &ReplArgs,
    invocation: &InvocationContext,
    launcher: &dyn ProcessLauncher,
) -> Result<LaunchOutcome> {
    let open_file = invocation.project.open_file_path.as_deref();
    let options = repl_options(args, open_file)?;

    let request = build_launch_request(&options, &invocation.project, &invocation.settings)
        .context("Failed to build REPL command")?;

    info!(
        cmd = ?request.cmd,
        cwd = %request.cwd.display(),
        "Starting REPL"
    );
    let outcome = launcher.launch(&request)?;

    match outcome.exit_code {
        Some(0) => {}
        Some(code) => info!(code, "REPL exited with non-zero status"),
        None => warn!("REPL was terminated by a signal"),
    }

    Ok(outcome)
}

fn repl_options(args: &ReplArgs, open_file: Option<&Path>) -> Result<ReplOptions> {
    let open_file = match open_file.filter(|_| !args.no_file_arg) {
        Some(path) => Some(
            path.to_str()
                .with_context(|| {
                    format!("Open file path is not valid UTF-8: {}", path.display())
                })?
                .to_string(),
        ),
        None => None,
    };

    Ok(ReplOptions {
        poetry: args.poetry,
        pytest: args.pytest,
        collect_only: args.collect_only,
        exit_first: args.exit_first,
        approvals_update: args.approvals_update,
        custom_cmd: (!args.cmd.is_empty()).then(|| args.cmd.clone()),
        open_file,
    })
}
