//! Filesystem collaborators.
//!
//! Composition touches the disk in exactly two places: listing a directory to
//! derive entry points and reading the package manifest to probe for an
//! optional capability. Both go through these traits so tests can inject an
//! in-memory filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::errors::ProbeError;

/// Lists the immediate entries of a directory.
pub trait DirectoryLister {
    /// Entries sorted by path.
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Reads a JSON manifest.
pub trait ManifestReader {
    fn read(&self, path: &Path) -> Result<Value, ProbeError>;
}

/// [`DirectoryLister`] over the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryLister;

impl DirectoryLister for FsDirectoryLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            entries.push(entry?.path());
        }
        entries.sort();
        Ok(entries)
    }
}

/// [`ManifestReader`] over the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsManifestReader;

impl ManifestReader for FsManifestReader {
    fn read(&self, path: &Path) -> Result<Value, ProbeError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ProbeError::new(path, e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| ProbeError::new(path, e.to_string()))
    }
}

/// Check whether a manifest declares `package` in its dependencies or
/// devDependencies.
pub fn declares_dependency(manifest: &Value, package: &str) -> bool {
    ["dependencies", "devDependencies"]
        .iter()
        .filter_map(|section| manifest.get(section).and_then(Value::as_object))
        .any(|deps| deps.contains_key(package))
}

/// Best-effort probe: any failure reads as "not declared".
pub fn probe_dependency(reader: &dyn ManifestReader, manifest: &Path, package: &str) -> bool {
    match reader.read(manifest) {
        Ok(value) => declares_dependency(&value, package),
        Err(e) => {
            tracing::debug!("{}; treating `{}` as absent", e, package);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_fs_lister_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.js"), "").unwrap();
        fs::write(tmp.path().join("a.js"), "").unwrap();

        let entries = FsDirectoryLister.list(tmp.path()).unwrap();
        assert_eq!(entries, vec![tmp.path().join("a.js"), tmp.path().join("b.js")]);
    }

    #[test]
    fn test_fs_lister_missing_dir_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(FsDirectoryLister.list(&tmp.path().join("nope")).is_err());
    }

    #[test]
    fn test_declares_dependency() {
        let manifest = json!({
            "dependencies": { "react": "^16" },
            "devDependencies": { "source-map-support": "^0.5" }
        });
        assert!(declares_dependency(&manifest, "source-map-support"));
        assert!(declares_dependency(&manifest, "react"));
        assert!(!declares_dependency(&manifest, "lodash"));
        assert!(!declares_dependency(&json!({}), "react"));
    }

    #[test]
    fn test_probe_swallows_missing_and_malformed_manifests() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("package.json");
        assert!(!probe_dependency(&FsManifestReader, &path, "source-map-support"));

        fs::write(&path, "{ not json").unwrap();
        assert!(!probe_dependency(&FsManifestReader, &path, "source-map-support"));

        fs::write(&path, r#"{"dependencies":{"source-map-support":"1"}}"#).unwrap();
        assert!(probe_dependency(&FsManifestReader, &path, "source-map-support"));
    }
}
