//! Registry resolution for the current project
//!
//! A package publishes to `publishConfig.registry` when its manifest sets one.
//! Otherwise the registry comes from npm configuration for the package's
//! scope, via a [`RegistryLookup`].

use crate::error::AuthError;
use crate::fs::TextFs;
use crate::manifest::ProjectManifest;
use crate::npmrc::{NPMRC_FILE, find_nearest_npmrc, read_npmrc};
use crate::settings::Settings;
use configparser::ini::{Ini, IniDefault};
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Public npm registry, used when nothing else is configured.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org/";

/// Source of the default registry URL for a scope.
pub trait RegistryLookup: std::fmt::Debug {
    /// Registry URL for `scope`, ending in `/`.
    ///
    /// `scope` is either an `@scope` prefix or, for unscoped packages, the
    /// package name itself.
    fn registry_url(&self, scope: Option<&str>) -> Result<String, AuthError>;
}

/// Registry the current project publishes to, normalized to end in one `/`.
pub fn resolve_registry(
    manifest: &ProjectManifest,
    lookup: &dyn RegistryLookup,
) -> Result<String, AuthError> {
    let candidate = match manifest.publish_registry() {
        Some(registry) => {
            debug!("using publishConfig.registry from package.json");
            registry.to_string()
        }
        None => lookup.registry_url(Some(manifest.scope()))?,
    };
    let registry = normalize_registry(&candidate);
    debug!("using {registry} registry for current package");
    Ok(registry)
}

/// Ensure `url` ends with exactly one `/`.
pub fn normalize_registry(url: &str) -> String {
    let mut normalized = url.trim_end_matches('/').to_string();
    normalized.push('/');
    normalized
}

/// [`RegistryLookup`] that follows npm's own configuration.
///
/// Precedence, highest first:
/// 1. `<scope>:registry`
/// 2. `npm_config_registry` from the environment
/// 3. `registry`
/// 4. [`DEFAULT_REGISTRY`]
///
/// Keys are read from `~/.npmrc` and then the nearest `.npmrc` above `cwd`,
/// later files overriding earlier ones. Files are located and read only when
/// a lookup is made. `${VAR}` references in values are expanded from the
/// environment captured in [`Settings`]; unknown variables are left as is.
#[derive(Debug)]
pub struct NpmrcRegistryLookup<'a> {
    fs: &'a dyn TextFs,
    settings: &'a Settings,
    home: Option<PathBuf>,
}

impl<'a> NpmrcRegistryLookup<'a> {
    pub fn new(fs: &'a dyn TextFs, settings: &'a Settings, home: Option<PathBuf>) -> Self {
        Self { fs, settings, home }
    }

    /// `.npmrc` files in ascending priority.
    fn sources(&self) -> Vec<PathBuf> {
        let mut sources = Vec::new();
        if let Some(home) = &self.home {
            sources.push(home.join(NPMRC_FILE));
        }
        if let Some(project) = find_nearest_npmrc(self.fs, &self.settings.cwd) {
            if !sources.contains(&project) {
                sources.push(project);
            }
        }
        sources
    }

    fn load(&self) -> Result<Vec<Ini>, AuthError> {
        self.sources()
            .iter()
            .map(|path| parse_npmrc(path, read_npmrc(self.fs, path)?))
            .collect()
    }

    /// Last value for `key` across the loaded files, env-expanded.
    fn value(&self, files: &[Ini], key: &str) -> Option<String> {
        files
            .iter()
            .rev()
            .find_map(|ini| ini.get(NPMRC_SECTION, key))
            .map(|value| expand_env(&value, self.settings))
            .filter(|value| !value.is_empty())
    }
}

impl RegistryLookup for NpmrcRegistryLookup<'_> {
    fn registry_url(&self, scope: Option<&str>) -> Result<String, AuthError> {
        let files = self.load()?;

        let scoped = scope
            .filter(|s| !s.is_empty())
            .and_then(|s| self.value(&files, format!("{s}:registry").as_str()));

        let url = scoped
            .or_else(|| self.settings.registry_override.clone().filter(|r| !r.is_empty()))
            .or_else(|| self.value(&files, "registry"))
            .unwrap_or_else(|| DEFAULT_REGISTRY.to_string());

        Ok(normalize_registry(&url))
    }
}

/// Section that holds top-level `.npmrc` keys.
const NPMRC_SECTION: &str = "default";

/// Parse `.npmrc` text the way npm's ini reader splits it: `=` is the only
/// delimiter (keys such as `@scope:registry` contain `:`), keys are
/// case-sensitive, and `;`/`#` start a comment anywhere on a line.
fn parse_npmrc(path: &Path, contents: String) -> Result<Ini, AuthError> {
    let mut defaults = IniDefault::default();
    defaults.default_section = NPMRC_SECTION.to_string();
    defaults.delimiters = vec!['='];
    defaults.case_sensitive = true;
    defaults.enable_inline_comments = true;

    let mut ini = Ini::new_from_defaults(defaults);
    ini.read(contents)
        .map_err(|message| AuthError::NpmrcParse {
            path: path.to_path_buf(),
            message,
        })?;
    Ok(ini)
}

static ENV_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^${}]+)\}").expect("env reference pattern is valid"));

/// Replace `${VAR}` with the captured value of `VAR`.
fn expand_env(value: &str, settings: &Settings) -> String {
    ENV_REF
        .replace_all(value, |caps: &Captures<'_>| match settings.var(&caps[1]) {
            Some(v) => v.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
