use serde_json::{json, Value};

use super::PresetOptions;
use crate::core::errors::PresetError;
use crate::middleware::base::Node;
use crate::middleware::decorators::Decorators;
use crate::middleware::devtool::DevtoolSelection;
use crate::middleware::lint::Lint;
use crate::middleware::loader_merge::LoaderMerge;
use crate::middleware::local_modules::LocalModules;
use crate::middleware::versioning::Versioning;
use crate::middleware::{Api, Middleware};

/// Node.js service preset.
///
/// Lint (Airbnb base), the `node` baseline, decorators, versioned production
/// output, source maps and the preset modules directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodePreset;

impl Middleware for NodePreset {
    fn name(&self) -> &str {
        "node-preset"
    }

    fn description(&self) -> &str {
        "Node.js service: lint, decorators, versioned output, source maps"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let opts = PresetOptions::parse(self.name(), options)?;
        let cache_version = opts.cache_version(self.name())?;

        api.use_middleware(&Lint, json!({ "use": ["airbnb-base"] }))?;
        api.use_middleware(&Node, Value::Object(opts.all.clone()))?;
        if !opts.eslint.is_null() {
            api.use_middleware(&LoaderMerge::new("lint", "eslint"), opts.eslint.clone())?;
        }
        api.use_middleware(&Decorators, Value::Null)?;
        api.use_middleware(&Versioning, json!({ "cacheVersion": cache_version }))?;
        api.use_middleware(&DevtoolSelection, Value::Null)?;
        api.use_middleware(&LocalModules, Value::Null)
    }
}
