//! Core library for npm-ci-auth
//!
//! Configures `.npmrc` so a CI job can publish with a token supplied through
//! the environment. The token itself is never written: the file gets a
//! `${NPM_TOKEN}` placeholder that npm expands at publish time.
//!
//! ```rust,no_run
//! use npm_ci_auth_core::fs::RealFs;
//! use npm_ci_auth_core::npmrc::LocalOrHomeNpmrc;
//! use npm_ci_auth_core::registry::NpmrcRegistryLookup;
//! use npm_ci_auth_core::{Settings, TokenWriter};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let home = npm_ci_auth_core::home::get_home_dir().ok();
//! let settings = Settings::from_env("NPM_TOKEN", &cwd);
//! let lookup = NpmrcRegistryLookup::new(&RealFs, &settings, home.clone());
//! let locator = LocalOrHomeNpmrc::new(&RealFs, &cwd, home);
//!
//! let outcome = TokenWriter::new(&settings, &RealFs, &lookup, &locator).run().unwrap();
//! println!("{}", outcome.path().display());
//! ```

pub mod error;
pub mod fs;
pub mod home;
pub mod logging;
pub mod manifest;
pub mod npmrc;
pub mod registry;
pub mod settings;
pub mod writer;

pub use error::AuthError;
pub use manifest::ProjectManifest;
pub use settings::Settings;
pub use writer::{TokenWriter, WriteOutcome};
