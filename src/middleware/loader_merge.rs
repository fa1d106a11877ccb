//! Merge an option bag into an existing loader's options.

use serde_json::Value;

use crate::core::errors::PresetError;
use crate::middleware::{Api, Middleware};

/// Merges its option bag into the options of `rule`'s `loader` use entry.
///
/// The rule and use entry must already exist; merging into a loader that no
/// base middleware installed is a configuration error.
#[derive(Debug, Clone)]
pub struct LoaderMerge {
    rule: String,
    loader: String,
    name: String,
}

impl LoaderMerge {
    pub fn new(rule: impl Into<String>, loader: impl Into<String>) -> Self {
        let rule = rule.into();
        let loader = loader.into();
        LoaderMerge {
            name: format!("loader-merge:{}:{}", rule, loader),
            rule,
            loader,
        }
    }
}

impl Middleware for LoaderMerge {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Merge options into an installed loader"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        if !options.is_null() && !options.is_object() {
            return Err(PresetError::config(
                &self.name,
                format!("options for `{}` must be an object", self.loader),
            ));
        }

        let entry = api
            .config
            .module
            .get_mut(&self.rule)
            .and_then(|rule| rule.get_use_mut(&self.loader))
            .ok_or_else(|| {
                PresetError::config(
                    &self.name,
                    format!(
                        "rule `{}` has no `{}` loader; apply its base middleware first",
                        self.rule, self.loader
                    ),
                )
            })?;

        entry.merge_options(options);
        Ok(())
    }
}
