//! `.npmrc` discovery and auth directive formatting

use crate::error::AuthError;
use crate::fs::TextFs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const NPMRC_FILE: &str = ".npmrc";
const MANIFEST_FILE: &str = "package.json";

/// Decides which `.npmrc` the token directive is written to.
pub trait NpmrcLocator: std::fmt::Debug {
    fn npmrc_path(&self) -> Result<PathBuf, AuthError>;
}

/// Project `.npmrc` when the project has one, else the user's `~/.npmrc`.
///
/// The project root is the nearest ancestor of `cwd` (inclusive) that
/// contains a `package.json`.
#[derive(Debug)]
pub struct LocalOrHomeNpmrc<'a> {
    fs: &'a dyn TextFs,
    cwd: PathBuf,
    home: Option<PathBuf>,
}

impl<'a> LocalOrHomeNpmrc<'a> {
    pub fn new(fs: &'a dyn TextFs, cwd: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            fs,
            cwd: cwd.into(),
            home,
        }
    }
}

impl NpmrcLocator for LocalOrHomeNpmrc<'_> {
    fn npmrc_path(&self) -> Result<PathBuf, AuthError> {
        if let Some(root) = find_project_root(self.fs, &self.cwd) {
            let local = root.join(NPMRC_FILE);
            if self.fs.exists(&local) {
                return Ok(local);
            }
        }
        self.home
            .as_ref()
            .map(|home| home.join(NPMRC_FILE))
            .ok_or(AuthError::HomeDir)
    }
}

/// Nearest ancestor of `start` (inclusive) containing `package.json`.
pub fn find_project_root(fs: &dyn TextFs, start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| fs.exists(&dir.join(MANIFEST_FILE)))
        .map(Path::to_path_buf)
}

/// Nearest `.npmrc` in `start` or any of its ancestors.
pub fn find_nearest_npmrc(fs: &dyn TextFs, start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(NPMRC_FILE))
        .find(|path| fs.exists(path))
}

/// Read an `.npmrc`, treating a missing file as empty.
pub fn read_npmrc(fs: &dyn TextFs, path: &Path) -> Result<String, AuthError> {
    match fs.read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} does not exist yet, starting from empty", path.display());
            Ok(String::new())
        }
        Err(source) => Err(AuthError::NpmrcRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// `//host/path/:_authToken=<placeholder>` for a registry URL.
///
/// Only a leading `https:` or `http:` is removed; the rest of the URL is kept
/// verbatim.
pub fn auth_directive(registry: &str, placeholder: &str) -> String {
    let nerfed = registry
        .strip_prefix("https:")
        .or_else(|| registry.strip_prefix("http:"))
        .unwrap_or(registry);
    format!("{nerfed}:_authToken={placeholder}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;

    #[test]
    fn test_auth_directive_strips_scheme() {
        assert_eq!(
            auth_directive("https://registry.npmjs.org/", "${NPM_TOKEN}"),
            "//registry.npmjs.org/:_authToken=${NPM_TOKEN}"
        );
        assert_eq!(
            auth_directive("http://localhost:4873/", "${NPM_TOKEN}"),
            "//localhost:4873/:_authToken=${NPM_TOKEN}"
        );
    }

    #[test]
    fn test_auth_directive_keeps_path() {
        assert_eq!(
            auth_directive(
                "https://pkgs.example.com/npm/team/registry/",
                "${NPM_TOKEN}"
            ),
            "//pkgs.example.com/npm/team/registry/:_authToken=${NPM_TOKEN}"
        );
    }

    #[test]
    fn test_auth_directive_without_scheme_is_unchanged() {
        assert_eq!(
            auth_directive("//registry.npmjs.org/", "${T}"),
            "//registry.npmjs.org/:_authToken=${T}"
        );
    }

    #[test]
    fn test_locator_prefers_project_npmrc() {
        let fs = MemoryFs::new()
            .with_file("/repo/package.json", "{}")
            .with_file("/repo/.npmrc", "");
        let locator = LocalOrHomeNpmrc::new(&fs, "/repo/src/lib", Some("/home/ci".into()));
        assert_eq!(locator.npmrc_path().unwrap(), PathBuf::from("/repo/.npmrc"));
    }

    #[test]
    fn test_locator_falls_back_to_home() {
        let fs = MemoryFs::new().with_file("/repo/package.json", "{}");
        let locator = LocalOrHomeNpmrc::new(&fs, "/repo", Some("/home/ci".into()));
        assert_eq!(
            locator.npmrc_path().unwrap(),
            PathBuf::from("/home/ci/.npmrc")
        );
    }

    #[test]
    fn test_locator_ignores_npmrc_above_project_root() {
        let fs = MemoryFs::new()
            .with_file("/mono/.npmrc", "")
            .with_file("/mono/packages/a/package.json", "{}");
        let locator = LocalOrHomeNpmrc::new(&fs, "/mono/packages/a", Some("/home/ci".into()));
        assert_eq!(
            locator.npmrc_path().unwrap(),
            PathBuf::from("/home/ci/.npmrc")
        );
    }

    #[test]
    fn test_locator_without_home() {
        let fs = MemoryFs::new();
        let locator = LocalOrHomeNpmrc::new(&fs, "/repo", None);
        assert!(matches!(locator.npmrc_path(), Err(AuthError::HomeDir)));
    }

    #[test]
    fn test_find_nearest_npmrc() {
        let fs = MemoryFs::new().with_file("/mono/.npmrc", "");
        assert_eq!(
            find_nearest_npmrc(&fs, Path::new("/mono/packages/a")),
            Some(PathBuf::from("/mono/.npmrc"))
        );
        assert_eq!(find_nearest_npmrc(&fs, Path::new("/other")), None);
    }

    #[test]
    fn test_read_npmrc_missing_is_empty() {
        let fs = MemoryFs::new();
        assert_eq!(read_npmrc(&fs, Path::new("/h/.npmrc")).unwrap(), "");
    }

    #[test]
    fn test_read_npmrc_other_errors_propagate() {
        let fs = MemoryFs::new()
            .with_file("/h/.npmrc", "x")
            .fail_reads("/h/.npmrc");
        let err = read_npmrc(&fs, Path::new("/h/.npmrc")).unwrap_err();
        assert!(matches!(err, AuthError::NpmrcRead { .. }));
    }
}
