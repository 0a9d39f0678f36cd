//! set-npm-auth-token-for-ci - prepare .npmrc for publishing from CI
//!
//! Appends a `${NPM_TOKEN}` auth directive for the package's registry to the
//! project or user `.npmrc`, leaving the file alone if it is already set up.

use clap::Parser;
use npm_ci_auth_core::logging;

mod cli;

use cli::Cli;

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
