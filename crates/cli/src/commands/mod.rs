//! CLI command implementations.

pub mod completions;
pub mod env;
pub mod repl;
