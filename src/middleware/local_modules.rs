//! Resolve modules shipped with the presets.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

use crate::core::errors::PresetError;
use crate::middleware::{decode_options, Api, Middleware};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct LocalModulesOptions {
    dir: Option<PathBuf>,
}

/// Adds the preset modules directory to module and loader resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalModules;

impl Middleware for LocalModules {
    fn name(&self) -> &str {
        "local-modules"
    }

    fn description(&self) -> &str {
        "Resolve modules and loaders from the preset modules directory"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let opts: LocalModulesOptions = decode_options(self.name(), options)?;
        let dir = match opts.dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => api.options.root.join(dir),
            None => api.options.preset_modules_dir(),
        };

        api.config.resolve.add_module(dir.clone());
        api.config.resolve_loader.add_module(dir);
        Ok(())
    }
}
