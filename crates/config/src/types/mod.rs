//! Core type definitions for ReplBuild.
//!
//! Responsibilities:
//! - Define the per-invocation project context.
//! - Define the environment mapping shared by the resolver, settings and launcher.
//!
//! Does NOT handle:
//! - Loading settings or project files (see `loader` module).
//! - Parsing environment files (see `dotenv` module).
//!
//! Invariants:
//! - Nothing here persists across invocations.

use std::collections::HashMap;

mod context;

pub use context::ProjectContext;

/// Parsed environment variable overrides.
///
/// Keys are unique; when a source yields a key twice the last value wins.
pub type EnvMap = HashMap<String, String>;
