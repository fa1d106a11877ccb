//! Test utilities and mocks for unit tests.
//!
//! This module provides an in-memory filesystem implementing the directory
//! listing and manifest probing collaborators, so middlewares can be tested
//! without touching the disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use rigging::test_support::{package_manifest, MockFileSystem};
//!
//! let mut fs = MockFileSystem::new();
//! fs.add_file("/app/package.json", package_manifest(&["react"], &[]));
//! fs.add_file("/app/src/components/Button.js", "");
//!
//! let api = Api::new(ProjectOptions::with_root("/app"), Environment::default())
//!     .with_lister(Box::new(fs.clone()))
//!     .with_manifest_reader(Box::new(fs));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::core::errors::ProbeError;
use crate::util::fs::{DirectoryLister, ManifestReader};

/// Mock filesystem for testing without real I/O.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl MockFileSystem {
    /// Create a new empty mock filesystem.
    pub fn new() -> Self {
        MockFileSystem::default()
    }

    /// Add a file with the given content, creating its parent directories.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path, content.into());
    }

    /// Add a directory and all of its parents.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Check if a path is a file.
    pub fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Check if a path is a directory.
    pub fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }
}

impl DirectoryLister for MockFileSystem {
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.is_dir(dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", dir.display()),
            ));
        }

        let children = self
            .files
            .keys()
            .chain(self.dirs.iter())
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect::<BTreeSet<_>>();
        Ok(children.into_iter().collect())
    }
}

impl ManifestReader for MockFileSystem {
    fn read(&self, path: &Path) -> Result<Value, ProbeError> {
        let bytes = self
            .files
            .get(path)
            .ok_or_else(|| ProbeError::new(path, "file not found"))?;
        serde_json::from_slice(bytes).map_err(|e| ProbeError::new(path, e.to_string()))
    }
}

/// Render a `package.json` declaring the given dependencies.
pub fn package_manifest(dependencies: &[&str], dev_dependencies: &[&str]) -> String {
    let section = |names: &[&str]| {
        names
            .iter()
            .map(|name| (name.to_string(), json!("*")))
            .collect::<Map<_, _>>()
    };
    json!({
        "name": "fixture",
        "version": "1.0.0",
        "dependencies": section(dependencies),
        "devDependencies": section(dev_dependencies),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_direct_children_sorted() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/app/src/components/b.js", "");
        fs.add_file("/app/src/components/a.js", "");
        fs.add_file("/app/src/components/icons/star.js", "");

        assert_eq!(
            fs.list(Path::new("/app/src/components")).unwrap(),
            vec![
                PathBuf::from("/app/src/components/a.js"),
                PathBuf::from("/app/src/components/b.js"),
                PathBuf::from("/app/src/components/icons"),
            ]
        );
        assert_eq!(
            fs.list(Path::new("/missing")).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[test]
    fn test_read_manifest() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/app/package.json", package_manifest(&["react"], &["jest"]));

        let manifest = fs.read(Path::new("/app/package.json")).unwrap();
        assert_eq!(manifest["dependencies"]["react"], "*");
        assert_eq!(manifest["devDependencies"]["jest"], "*");
        assert!(fs.read(Path::new("/other/package.json")).is_err());
    }
}
