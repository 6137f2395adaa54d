//! Env command implementation.
//!
//! Responsibilities:
//! - Report which `.env` file applies to a file and the environment a REPL would get.
//!
//! Does NOT handle:
//! - Launching anything.
//!
//! Invariants:
//! - The resolved path goes to stderr; stdout carries only the environment.
//! - Output keys are sorted.
//! - Dotenv output reads back to the same mapping through the `.env` parser.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{Context, Result};
use replbuild_config::resolve_path;

use crate::args::EnvFormat;
use crate::context::InvocationContext;
use crate::repl::build_environment;

pub fn run(format: EnvFormat, invocation: &InvocationContext, out: &mut dyn Write) -> Result<()> {
    let env_file = invocation.settings.env_file()?;
    match resolve_path(&env_file, &invocation.project) {
        Some(path) => eprintln!("# env file: {}", path.display()),
        None => eprintln!("# env file: {env_file} (unresolved)"),
    }

    let env = build_environment(&invocation.project, &invocation.settings)
        .context("Failed to resolve environment")?;
    let sorted: BTreeMap<_, _> = env.iter().collect();

    match format {
        EnvFormat::Dotenv => {
            for (key, value) in sorted {
                writeln!(out, "{key}={}", dotenv_value(value))?;
            }
        }
        EnvFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &sorted)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Quote a value when the `.env` parser would otherwise trim or unquote it.
///
/// The parser strips exactly one outer pair of matching quotes and has no
/// escapes, so wrapping in double quotes is always enough.
fn dotenv_value(value: &str) -> Cow<'_, str> {
    let bytes = value.as_bytes();
    let looks_quoted = bytes.len() >= 2
        && bytes[0] == bytes[bytes.len() - 1]
        && matches!(bytes[0], b'"' | b'\'');

    if looks_quoted || value.trim() != value {
        Cow::Owned(format!("\"{value}\""))
    } else {
        Cow::Borrowed(value)
    }
}
