//! Command-line entry point for `set-npm-auth-token-for-ci`.

use anyhow::Result;
use clap::Parser;
use npm_ci_auth_core::fs::RealFs;
use npm_ci_auth_core::home::get_home_dir;
use npm_ci_auth_core::npmrc::LocalOrHomeNpmrc;
use npm_ci_auth_core::registry::NpmrcRegistryLookup;
use npm_ci_auth_core::settings::DEFAULT_TOKEN_VAR;
use npm_ci_auth_core::{Settings, TokenWriter, WriteOutcome};
use std::path::PathBuf;
use tracing::debug;

/// Write an npm auth token placeholder into .npmrc for CI publishing
#[derive(Parser, Debug)]
#[command(
    name = "set-npm-auth-token-for-ci",
    version,
    about = "Write an npm auth token placeholder into .npmrc for CI publishing",
    long_about = "Resolves the registry the current package publishes to and appends \
                  `//<registry>/:_authToken=${NPM_TOKEN}` to the project or user .npmrc \
                  unless it is already there. The token value itself is never written."
)]
pub struct Cli {
    /// Environment variable holding the publish token
    #[arg(long, value_name = "NAME", default_value = DEFAULT_TOKEN_VAR)]
    token_var: String,

    /// Project directory containing package.json (default: current directory)
    #[arg(long, value_name = "DIR")]
    cwd: Option<PathBuf>,
}

impl Cli {
    /// Run one token-setup pass and report the outcome on stdout
    pub fn execute(self) -> Result<()> {
        let current_dir = std::env::current_dir()?;
        let cwd = match self.cwd {
            Some(dir) => current_dir.join(dir),
            None => current_dir,
        };

        let settings = Settings::from_env(self.token_var, &cwd);
        let home = get_home_dir().ok();
        debug!("project directory {}", cwd.display());

        let fs = RealFs;
        let lookup = NpmrcRegistryLookup::new(&fs, &settings, home.clone());
        let locator = LocalOrHomeNpmrc::new(&fs, &cwd, home);

        match TokenWriter::new(&settings, &fs, &lookup, &locator).run()? {
            WriteOutcome::Written { path, directive } => {
                println!("Wrote {directive} to {}", path.display());
            }
            WriteOutcome::AlreadyConfigured { path, .. } => {
                println!("{} is already configured", path.display());
            }
        }

        Ok(())
    }
}
