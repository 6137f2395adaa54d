//! Tests for the settings loader builder.
//!
//! Responsibilities:
//! - Test dotenv loading of ReplBuild's own `.env` file.
//! - Test settings and project file layering and precedence.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (tested in env.rs).
//! - Setting resolution across scopes (tested in `settings`).
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
