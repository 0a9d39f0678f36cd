//! Invocation settings captured from the process environment
//!
//! The writer and the registry lookup never read environment variables
//! themselves. The binary builds a [`Settings`] once at startup and passes it
//! down, which keeps the core testable without touching process state.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default name of the variable holding the publish token.
pub const DEFAULT_TOKEN_VAR: &str = "NPM_TOKEN";

/// Environment variables npm reads a registry override from.
const REGISTRY_ENV_VARS: [&str; 2] = ["npm_config_registry", "NPM_CONFIG_REGISTRY"];

/// Inputs for a single token-setup pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Name of the token variable referenced by the written placeholder
    pub token_var: String,
    /// Value of the token variable at startup (only presence matters)
    pub token: Option<String>,
    /// Registry override from `npm_config_registry`
    pub registry_override: Option<String>,
    /// Directory `package.json` is resolved against
    pub cwd: PathBuf,
    /// Environment snapshot used to expand `${VAR}` in `.npmrc` values
    pub vars: BTreeMap<String, String>,
}

impl Settings {
    /// Settings with no token and no registry override.
    pub fn new(token_var: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            token_var: token_var.into(),
            token: None,
            registry_override: None,
            cwd: cwd.into(),
            vars: BTreeMap::new(),
        }
    }

    /// Capture the token and registry override from the process environment.
    pub fn from_env(token_var: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        let mut settings = Self::new(token_var, cwd);
        settings.token = std::env::var(&settings.token_var).ok();
        settings.registry_override = REGISTRY_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());
        settings.vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        settings
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_registry_override(mut self, registry: impl Into<String>) -> Self {
        self.registry_override = Some(registry.into());
        self
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Value of an environment variable captured at startup.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Whether a non-empty token was supplied.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The literal `${VAR}` reference written into `.npmrc`.
    pub fn token_placeholder(&self) -> String {
        format!("${{{}}}", self.token_var)
    }

    /// `<cwd>/package.json`
    pub fn manifest_path(&self) -> PathBuf {
        self.cwd.join("package.json")
    }
}
