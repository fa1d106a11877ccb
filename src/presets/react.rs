use serde_json::{json, Value};

use super::PresetOptions;
use crate::core::environment::Condition;
use crate::core::errors::PresetError;
use crate::middleware::base::React;
use crate::middleware::devtool::DevtoolSelection;
use crate::middleware::lint::ReactLint;
use crate::middleware::versioning::Versioning;
use crate::middleware::{Api, Middleware};

/// React application preset.
///
/// Output filenames are versioned for every `build`, whatever the mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactPreset;

impl Middleware for ReactPreset {
    fn name(&self) -> &str {
        "react-preset"
    }

    fn description(&self) -> &str {
        "React application: React lint rules, versioned build output, source maps"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let opts = PresetOptions::parse(self.name(), options)?;
        let cache_version = opts.cache_version(self.name())?;

        api.use_middleware(&ReactLint, opts.eslint.clone())?;
        api.use_middleware(&React, opts.get("react"))?;
        api.use_middleware(
            &Versioning,
            json!({ "cacheVersion": cache_version, "when": Condition::IsBuildCommand }),
        )?;
        api.use_middleware(&DevtoolSelection, Value::Null)
    }
}
