//! Home directory resolution for the user `.npmrc`
//!
//! # Precedence
//!
//! 1. `NPM_CI_AUTH_HOME` environment variable (if set and non-empty)
//! 2. `dirs::home_dir()` platform default
//!
//! Integration tests set `NPM_CI_AUTH_HOME` so the binary never touches the
//! real `~/.npmrc`:
//!
//! ```ignore
//! use assert_cmd::Command;
//! use tempfile::TempDir;
//!
//! let temp_dir = TempDir::new().unwrap();
//! let mut cmd = Command::cargo_bin("set-npm-auth-token-for-ci").unwrap();
//! cmd.env("NPM_CI_AUTH_HOME", temp_dir.path());
//! ```

use crate::error::AuthError;
use std::path::PathBuf;

pub const HOME_ENV_VAR: &str = "NPM_CI_AUTH_HOME";

/// Get the directory whose `.npmrc` is the user-level fallback.
///
/// # Errors
///
/// Returns [`AuthError::HomeDir`] if `NPM_CI_AUTH_HOME` is unset and the
/// platform home directory cannot be determined.
pub fn get_home_dir() -> Result<PathBuf, AuthError> {
    if let Ok(home) = std::env::var(HOME_ENV_VAR) {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    dirs::home_dir().ok_or(AuthError::HomeDir)
}
