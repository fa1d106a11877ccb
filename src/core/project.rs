//! Project layout options shared by all middlewares.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the package manifest probed for optional capabilities.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Project-level paths and names.
///
/// Relative paths are resolved against `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectOptions {
    /// Project root directory.
    pub root: PathBuf,
    /// Source directory.
    pub source: PathBuf,
    /// Output directory.
    pub output: PathBuf,
    /// Installed dependencies directory.
    pub node_modules: PathBuf,
    /// Directory holding the modules that ship with the presets themselves.
    pub modules_dir: Option<PathBuf>,
    /// Main entry name (file stem under `source`).
    pub entry: String,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        ProjectOptions {
            root: PathBuf::from("."),
            source: PathBuf::from("src"),
            output: PathBuf::from("build"),
            node_modules: PathBuf::from("node_modules"),
            modules_dir: None,
            entry: "index".to_string(),
        }
    }
}

impl ProjectOptions {
    /// Options rooted at `root` with default layout.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        ProjectOptions {
            root: root.into(),
            ..Default::default()
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn source_dir(&self) -> PathBuf {
        self.resolve(&self.source)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.output)
    }

    pub fn node_modules_dir(&self) -> PathBuf {
        self.resolve(&self.node_modules)
    }

    /// Modules shipped with the presets; the project's `node_modules` unless overridden.
    pub fn preset_modules_dir(&self) -> PathBuf {
        match &self.modules_dir {
            Some(dir) => self.resolve(dir),
            None => self.node_modules_dir(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(PACKAGE_MANIFEST)
    }

    /// Path of the main entry file (without extension).
    pub fn entry_path(&self) -> PathBuf {
        self.source_dir().join(&self.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_resolve_against_root() {
        let opts = ProjectOptions::with_root("/work/app");
        assert_eq!(opts.source_dir(), PathBuf::from("/work/app/src"));
        assert_eq!(opts.output_dir(), PathBuf::from("/work/app/build"));
        assert_eq!(opts.manifest_path(), PathBuf::from("/work/app/package.json"));
        assert_eq!(opts.entry_path(), PathBuf::from("/work/app/src/index"));
        assert_eq!(opts.preset_modules_dir(), PathBuf::from("/work/app/node_modules"));
    }

    #[test]
    fn test_absolute_paths_kept() {
        let mut opts = ProjectOptions::with_root("/work/app");
        opts.modules_dir = Some(PathBuf::from("/opt/presets/node_modules"));
        assert_eq!(opts.preset_modules_dir(), PathBuf::from("/opt/presets/node_modules"));
    }
}
