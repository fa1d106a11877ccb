//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.rigging/config.toml` - user-wide defaults
//! - Project: `.rigging/config.toml` - project-specific overrides
//!
//! Project config takes precedence over global config. Preset option tables
//! are merged key by key, so a project can override a single option.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::project::ProjectOptions;
use crate::util::merge::merge;

/// Name of the configuration directory, globally and per project.
pub const CONFIG_DIR: &str = ".rigging";

/// Name of the configuration file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Rigging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preset selection
    pub preset: PresetConfig,

    /// Project layout overrides
    pub project: ProjectConfig,

    /// Option bag handed to the preset
    #[serde(skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetConfig {
    /// Registered middleware used as the preset
    pub name: Option<String>,
}

/// Project layout settings; unset fields keep the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub node_modules: Option<PathBuf>,
    pub modules_dir: Option<PathBuf>,
    pub entry: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist
    /// or cannot be read.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.preset.name.is_some() {
            self.preset.name = other.preset.name;
        }

        let project = other.project;
        if project.source.is_some() {
            self.project.source = project.source;
        }
        if project.output.is_some() {
            self.project.output = project.output;
        }
        if project.node_modules.is_some() {
            self.project.node_modules = project.node_modules;
        }
        if project.modules_dir.is_some() {
            self.project.modules_dir = project.modules_dir;
        }
        if project.entry.is_some() {
            self.project.entry = project.entry;
        }

        self.options = merge(&self.options, &other.options);
    }

    /// Project options rooted at `root` with this config's overrides applied.
    pub fn project_options(&self, root: &Path) -> ProjectOptions {
        let mut options = ProjectOptions::with_root(root);
        let project = &self.project;
        if let Some(source) = &project.source {
            options.source = source.clone();
        }
        if let Some(output) = &project.output {
            options.output = output.clone();
        }
        if let Some(node_modules) = &project.node_modules {
            options.node_modules = node_modules.clone();
        }
        if project.modules_dir.is_some() {
            options.modules_dir = project.modules_dir.clone();
        }
        if let Some(entry) = &project.entry {
            options.entry = entry.clone();
        }
        options
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.rigging/config.toml)
/// 2. Global config (~/.rigging/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }
    config.merge(Config::load_or_default(project_path));

    config
}

/// Project configuration file under `root`.
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join(CONFIG_FILE)
}
