//! `package.json` fields relevant to publishing

use crate::error::AuthError;
use crate::fs::TextFs;
use serde::Deserialize;
use std::path::Path;

/// The subset of `package.json` the resolver looks at.
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    /// Package name, possibly `@scope/name`
    pub name: String,
    #[serde(default)]
    pub publish_config: Option<PublishConfig>,
}

/// `publishConfig` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PublishConfig {
    #[serde(default)]
    pub registry: Option<String>,
}

impl ProjectManifest {
    /// Read and parse the manifest at `path`.
    pub fn load(fs: &dyn TextFs, path: &Path) -> Result<Self, AuthError> {
        let contents = fs
            .read_to_string(path)
            .map_err(|source| AuthError::ManifestRead {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&contents).map_err(|source| AuthError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `publishConfig.registry`, if set to a non-empty string.
    pub fn publish_registry(&self) -> Option<&str> {
        self.publish_config
            .as_ref()
            .and_then(|c| c.registry.as_deref())
            .filter(|r| !r.is_empty())
    }

    /// Text before the first `/` of the name, or the whole name if unscoped.
    pub fn scope(&self) -> &str {
        self.name.split('/').next().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;

    fn parse(json: &str) -> ProjectManifest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_scope_of_scoped_package() {
        assert_eq!(parse(r#"{"name": "@acme/widgets"}"#).scope(), "@acme");
    }

    #[test]
    fn test_scope_of_unscoped_package_is_name() {
        assert_eq!(parse(r#"{"name": "test-package"}"#).scope(), "test-package");
    }

    #[test]
    fn test_publish_registry() {
        let manifest = parse(
            r#"{"name": "test-package", "version": "1.0.0",
                "publishConfig": {"registry": "https://example.com", "access": "public"}}"#,
        );
        assert_eq!(manifest.publish_registry(), Some("https://example.com"));
    }

    #[test]
    fn test_empty_publish_registry_is_ignored() {
        let manifest = parse(r#"{"name": "p", "publishConfig": {"registry": ""}}"#);
        assert_eq!(manifest.publish_registry(), None);

        let manifest = parse(r#"{"name": "p", "publishConfig": {"access": "public"}}"#);
        assert_eq!(manifest.publish_registry(), None);
    }

    #[test]
    fn test_load_missing_file() {
        let fs = MemoryFs::new();
        let err = ProjectManifest::load(&fs, Path::new("/w/package.json")).unwrap_err();
        assert!(matches!(err, AuthError::ManifestRead { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let fs = MemoryFs::new().with_file("/w/package.json", "{not json");
        let err = ProjectManifest::load(&fs, Path::new("/w/package.json")).unwrap_err();
        assert!(matches!(err, AuthError::ManifestParse { .. }));
    }

    #[test]
    fn test_load_requires_name() {
        let fs = MemoryFs::new().with_file("/w/package.json", r#"{"version": "1.0.0"}"#);
        let err = ProjectManifest::load(&fs, Path::new("/w/package.json")).unwrap_err();
        assert!(err.to_string().contains("name"));
    }
}
