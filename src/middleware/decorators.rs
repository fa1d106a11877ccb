//! Decorator and class property syntax support.

use serde_json::{json, Value};

use crate::core::errors::PresetError;
use crate::middleware::{Api, Middleware};
use crate::util::merge::merge_compile_options;

pub const DECORATORS_PLUGIN: &str = "@babel/plugin-proposal-decorators";
pub const CLASS_PROPERTIES_PLUGIN: &str = "@babel/plugin-proposal-class-properties";

/// Enables legacy decorators and class properties in the compile rule.
///
/// Decorators must be transformed before the other syntax plugins, so these
/// are merged in front of the existing compiler options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decorators;

impl Middleware for Decorators {
    fn name(&self) -> &str {
        "decorators"
    }

    fn description(&self) -> &str {
        "Legacy decorators and class properties, ahead of other compiler plugins"
    }

    fn apply(&self, api: &mut Api, _options: &Value) -> Result<(), PresetError> {
        let babel = api
            .config
            .module
            .get_mut("compile")
            .and_then(|rule| rule.get_use_mut("babel"))
            .ok_or_else(|| {
                PresetError::config(
                    "decorators",
                    "requires the `compile` rule with a `babel` loader; use a base preset first",
                )
            })?;

        let plugins = json!({
            "plugins": [
                [DECORATORS_PLUGIN, { "legacy": true }],
                CLASS_PROPERTIES_PLUGIN
            ]
        });
        babel.tap(|current| merge_compile_options(&plugins, &current));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::environment::Environment;
    use crate::core::project::ProjectOptions;
    use crate::middleware::base::CompileLoader;

    #[test]
    fn test_decorators_come_first() {
        let mut api = Api::new(ProjectOptions::default(), Environment::default());
        api.use_middleware(
            &CompileLoader,
            json!({ "babel": { "plugins": ["@babel/plugin-syntax-dynamic-import"] } }),
        )
        .unwrap();
        api.use_middleware(&Decorators, Value::Null).unwrap();

        let options = &api.config.module.get("compile").unwrap().get_use("babel").unwrap().options;
        assert_eq!(
            options["plugins"],
            json!([
                [DECORATORS_PLUGIN, { "legacy": true }],
                CLASS_PROPERTIES_PLUGIN,
                "@babel/plugin-syntax-dynamic-import"
            ])
        );
        assert_eq!(options["cacheDirectory"], true);
    }

    #[test]
    fn test_requires_compile_rule() {
        let mut api = Api::new(ProjectOptions::default(), Environment::default());
        let err = api.use_middleware(&Decorators, Value::Null).unwrap_err();
        assert!(err.is_configuration());
        assert!(!api.config.module.has("compile"));
    }
}
