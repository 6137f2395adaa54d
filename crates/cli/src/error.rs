//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ConfigError and LaunchError values to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Exit codes of a launched REPL, which are passed through unchanged.
//!
//! Invariants:
//! - Exit code 2 is left to clap for usage errors.

use replbuild_config::ConfigError;

use crate::launcher::LaunchError;

/// Structured exit codes for replbuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Configuration error - unknown placeholder, non-textual setting,
    /// unreadable or malformed settings file.
    ///
    /// Scripts should fix the settings rather than retry.
    ConfigurationError = 3,

    /// Launch failure - the interpreter could not be started.
    LaunchFailed = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::UnknownPlaceholder { .. }
            | ConfigError::NonTextualSetting { .. }
            | ConfigError::SettingsFileRead { .. }
            | ConfigError::SettingsFileParse { .. }
            | ConfigError::ConfigDirUnavailable(_)
            | ConfigError::DotenvParse { .. }
            | ConfigError::DotenvIo { .. }
            | ConfigError::DotenvUnknown => ExitCode::ConfigurationError,

            ConfigError::EnvFileRead { .. } => ExitCode::GeneralError,
        }
    }
}

impl From<&LaunchError> for ExitCode {
    fn from(err: &LaunchError) -> Self {
        match err {
            LaunchError::EmptyCommand | LaunchError::Spawn { .. } => ExitCode::LaunchFailed,
            LaunchError::Output(_) | LaunchError::Serialize(_) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
            if let Some(launch_err) = cause.downcast_ref::<LaunchError>() {
                return ExitCode::from(launch_err);
            }
        }

        ExitCode::GeneralError
    }
}
