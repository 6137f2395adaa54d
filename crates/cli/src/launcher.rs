//! Process launching for assembled REPL commands.
//!
//! Responsibilities:
//! - Define the launch request handed from command construction to a launcher.
//! - Define the `ProcessLauncher` capability and its implementations.
//!
//! Does NOT handle:
//! - Building the command line or environment (see `repl` module).
//! - Interpreting the REPL's own exit status (passed back to the caller).
//!
//! Invariants:
//! - `SubprocessLauncher` inherits stdio and blocks until the child exits.
//! - The request environment extends, never replaces, the inherited environment.
//! - `DryRunLauncher` output is deterministic (environment keys sorted).

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use replbuild_config::EnvMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Variable Python reads to pick the encoding of its standard streams.
const PYTHON_IO_ENCODING: &str = "PYTHONIOENCODING";

/// Everything needed to start one REPL session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRequest {
    /// Program followed by its arguments.
    pub cmd: Vec<String>,
    /// Working directory of the child.
    pub cwd: PathBuf,
    /// Encoding requested for the child's standard streams.
    pub encoding: String,
    /// Identifier of the session.
    pub external_id: String,
    /// Variables added to the inherited environment.
    #[serde(serialize_with = "serialize_sorted")]
    pub env: EnvMap,
}

fn serialize_sorted<S>(env: &EnvMap, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    env.iter().collect::<BTreeMap<_, _>>().serialize(serializer)
}

/// Result of a launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Exit code of the child; `None` if it was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl LaunchOutcome {
    pub fn success() -> Self {
        Self { exit_code: Some(0) }
    }
}

/// Errors raised while launching.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Cannot launch an empty command")]
    EmptyCommand,

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write launch request: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to serialize launch request: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Capability to start an interactive process.
pub trait ProcessLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<LaunchOutcome, LaunchError>;
}

/// Starts the request as a child process attached to the current terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubprocessLauncher;

impl ProcessLauncher for SubprocessLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<LaunchOutcome, LaunchError> {
        let (program, args) = request
            .cmd
            .split_first()
            .ok_or(LaunchError::EmptyCommand)?;

        let mut command = Command::new(program);
        command.args(args).current_dir(&request.cwd).envs(&request.env);
        if !request.env.contains_key(PYTHON_IO_ENCODING)
            && std::env::var_os(PYTHON_IO_ENCODING).is_none()
        {
            command.env(PYTHON_IO_ENCODING, &request.encoding);
        }

        tracing::info!(
            program = %program,
            args = ?args,
            cwd = %request.cwd.display(),
            external_id = %request.external_id,
            env_vars = request.env.len(),
            "Launching REPL"
        );

        let status = command.status().map_err(|source| LaunchError::Spawn {
            program: program.clone(),
            source,
        })?;

        tracing::debug!(status = %status, "REPL exited");
        Ok(LaunchOutcome {
            exit_code: status.code(),
        })
    }
}

/// Writes the request as JSON instead of starting anything.
pub struct DryRunLauncher<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> DryRunLauncher<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> ProcessLauncher for DryRunLauncher<W> {
    fn launch(&self, request: &LaunchRequest) -> Result<LaunchOutcome, LaunchError> {
        if request.cmd.is_empty() {
            return Err(LaunchError::EmptyCommand);
        }

        let mut out = self.out.borrow_mut();
        serde_json::to_writer_pretty(&mut *out, request)?;
        writeln!(out)?;
        out.flush()?;
        Ok(LaunchOutcome::success())
    }
}
