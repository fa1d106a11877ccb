//! Global context for composition runs.
//!
//! Provides centralized access to the working directory, configuration paths
//! and output settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::errors::PresetError;
use crate::core::project::PACKAGE_MANIFEST;
use crate::util::config::{project_config_path, CONFIG_DIR, CONFIG_FILE};
use crate::util::diagnostic::{self, suggestions, Diagnostic};

/// Overrides the global configuration directory.
pub const HOME_VAR: &str = "RIGGING_HOME";

/// Global context containing configuration paths and output settings.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global configuration (~/.rigging/), if one exists
    home: Option<PathBuf>,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let home = std::env::var_os(HOME_VAR)
            .map(PathBuf::from)
            .or_else(|| directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR)));

        GlobalContext {
            cwd,
            home,
            verbose: false,
            color: true,
        }
    }

    /// Replace the global configuration directory.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration directory.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.home.as_ref().map(|home| home.join(CONFIG_FILE))
    }

    /// Get the project configuration file path for `root`.
    pub fn project_config_path(&self, root: &Path) -> PathBuf {
        project_config_path(root)
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Diagnostic for a failed composition.
    ///
    /// Without `--verbose` the user is pointed at it to see the run list.
    pub fn diagnostic(&self, err: &PresetError) -> Diagnostic {
        let diag = err.to_diagnostic();
        if self.verbose {
            diag
        } else {
            diag.with_suggestion(suggestions::VERBOSE)
        }
    }

    /// Print a diagnostic to stderr using the context's color setting.
    pub fn emit(&self, diagnostic: &Diagnostic) {
        diagnostic::emit(diagnostic, self.color);
    }

    /// Find the project root, searching upward from cwd.
    ///
    /// A project root holds a package manifest or a `.rigging` directory.
    /// Without one, the working directory itself is the root.
    pub fn find_project_root(&self) -> PathBuf {
        let mut current = self.cwd.clone();
        loop {
            if current.join(PACKAGE_MANIFEST).is_file() || current.join(CONFIG_DIR).is_dir() {
                return current;
            }
            if !current.pop() {
                tracing::debug!("no project root above {}", self.cwd.display());
                return self.cwd.clone();
            }
        }
    }
}
