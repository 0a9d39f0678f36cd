//! Error types for token setup

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring `.npmrc` authentication
#[derive(Error, Debug)]
pub enum AuthError {
    /// The token variable is unset or empty
    #[error("Cannot find {var} set in your environment.")]
    MissingToken { var: String },

    /// `package.json` could not be read
    #[error("Failed to read {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// `package.json` is not valid JSON or lacks a `name`
    #[error("Failed to parse {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// An `.npmrc` file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    NpmrcRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An `.npmrc` file is not valid ini
    #[error("Failed to parse {path}: {message}")]
    NpmrcParse { path: PathBuf, message: String },

    /// Writing the updated `.npmrc` failed
    #[error("Failed to write {path}: {source}")]
    NpmrcWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No home directory could be determined for the user `.npmrc`
    #[error("Could not determine home directory")]
    HomeDir,
}
