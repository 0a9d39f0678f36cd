//! Idempotent `.npmrc` token setup
//!
//! [`TokenWriter::run`] performs one read-check-write pass:
//!
//! 1. Fail unless the token variable is set (no I/O before this check)
//! 2. Read `<cwd>/package.json` and resolve the publish registry
//! 3. Locate the `.npmrc` to update and read it (missing means empty)
//! 4. Append `//host/path/:_authToken=${VAR}` unless that exact text is
//!    already present
//!
//! Presence is a plain substring test. A line for the same host with a
//! different value (for example a literal token) does not count, and the
//! placeholder line is appended after it.

use crate::error::AuthError;
use crate::fs::TextFs;
use crate::manifest::ProjectManifest;
use crate::npmrc::{NpmrcLocator, auth_directive, read_npmrc};
use crate::registry::{RegistryLookup, resolve_registry};
use crate::settings::Settings;
use std::path::PathBuf;
use tracing::debug;

/// Result of a successful pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The directive was appended and the file rewritten
    Written { path: PathBuf, directive: String },
    /// The directive was already present; nothing was written
    AlreadyConfigured { path: PathBuf, directive: String },
}

impl WriteOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Written { path, .. } | Self::AlreadyConfigured { path, .. } => path,
        }
    }

    pub fn directive(&self) -> &str {
        match self {
            Self::Written { directive, .. } | Self::AlreadyConfigured { directive, .. } => directive,
        }
    }
}

/// Writes the auth token placeholder for the current project's registry.
#[derive(Debug)]
pub struct TokenWriter<'a> {
    settings: &'a Settings,
    fs: &'a dyn TextFs,
    registry: &'a dyn RegistryLookup,
    locator: &'a dyn NpmrcLocator,
}

impl<'a> TokenWriter<'a> {
    pub fn new(
        settings: &'a Settings,
        fs: &'a dyn TextFs,
        registry: &'a dyn RegistryLookup,
        locator: &'a dyn NpmrcLocator,
    ) -> Self {
        Self {
            settings,
            fs,
            registry,
            locator,
        }
    }

    pub fn run(&self) -> Result<WriteOutcome, AuthError> {
        if !self.settings.has_token() {
            return Err(AuthError::MissingToken {
                var: self.settings.token_var.clone(),
            });
        }

        let manifest = ProjectManifest::load(self.fs, &self.settings.manifest_path())?;
        let registry = resolve_registry(&manifest, self.registry)?;

        let path = self.locator.npmrc_path()?;
        let contents = read_npmrc(self.fs, &path)?;
        let directive = auth_directive(&registry, &self.settings.token_placeholder());

        debug!("will set authentication token string in {}", path.display());

        if contents.contains(&directive) {
            debug!("npmrc file {} is already set up", path.display());
            return Ok(WriteOutcome::AlreadyConfigured { path, directive });
        }

        debug!("writing {directive} to {}", path.display());
        self.fs
            .write(&path, &merge_directive(&contents, &directive))
            .map_err(|source| AuthError::NpmrcWrite {
                path: path.clone(),
                source,
            })?;

        Ok(WriteOutcome::Written { path, directive })
    }
}

/// Existing contents, a newline, the directive, and a trailing newline.
fn merge_directive(contents: &str, directive: &str) -> String {
    format!("{contents}\n{directive}\n")
}
