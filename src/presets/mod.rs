//! Named presets.
//!
//! A preset is a middleware that only sequences other middlewares. The option
//! bag it receives is shared: each step picks out the part it understands.

mod components;
mod library;
mod node;
mod react;

pub use components::ReactComponentsPreset;
pub use library::LibraryPreset;
pub use node::NodePreset;
pub use react::ReactPreset;

use serde_json::{Map, Value};

use crate::core::errors::PresetError;
use crate::middleware::options_object;
use crate::util::template::DEFAULT_CACHE_VERSION;

/// The keys presets read from their shared option bag.
#[derive(Debug, Clone, Default)]
pub(crate) struct PresetOptions {
    /// The whole bag, forwarded to the base preset.
    pub all: Map<String, Value>,
    /// Caller eslint overrides.
    pub eslint: Value,
}

impl PresetOptions {
    pub fn parse(preset: &str, options: &Value) -> Result<Self, PresetError> {
        let all = options_object(preset, options)?;
        let eslint = all.get("eslint").cloned().unwrap_or(Value::Null);
        if !eslint.is_null() && !eslint.is_object() {
            return Err(PresetError::config(preset, "`eslint` must be an object"));
        }
        Ok(PresetOptions { all, eslint })
    }

    pub fn get(&self, key: &str) -> Value {
        self.all.get(key).cloned().unwrap_or(Value::Null)
    }

    /// `cacheVersion`, or the default version.
    pub fn cache_version(&self, preset: &str) -> Result<String, PresetError> {
        match self.all.get("cacheVersion") {
            None | Some(Value::Null) => Ok(DEFAULT_CACHE_VERSION.to_string()),
            Some(Value::String(version)) => Ok(version.clone()),
            Some(other) => Err(PresetError::config(
                preset,
                format!("`cacheVersion` must be a string, found `{}`", other),
            )),
        }
    }
}
