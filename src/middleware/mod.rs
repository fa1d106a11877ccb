//! Middlewares: ordered composition steps over a shared configuration.
//!
//! A middleware receives the [`Api`] (configuration, project options,
//! environment and collaborators) plus a JSON option bag, which it decodes into
//! its own typed options before touching anything.

pub mod api;
pub mod base;
pub mod decorators;
pub mod devtool;
pub mod library;
pub mod lint;
pub mod loader_merge;
pub mod local_modules;
pub mod plugins;
pub mod registry;
pub mod rules;
pub mod versioning;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::errors::PresetError;

pub use api::Api;
pub use registry::MiddlewareRegistry;

/// A configuration composition step.
pub trait Middleware {
    /// Registry name, also used in error messages.
    fn name(&self) -> &str;

    /// One-line summary for `rig list`.
    fn description(&self) -> &str {
        ""
    }

    /// Apply this middleware to the composition context.
    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError>;
}

/// Decode a middleware's option bag into its typed options.
///
/// `null` (no options supplied) yields the defaults.
pub fn decode_options<T>(middleware: &str, options: &Value) -> Result<T, PresetError>
where
    T: DeserializeOwned + Default,
{
    if options.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(options.clone())
        .map_err(|e| PresetError::config(middleware, format!("invalid options: {}", e)))
}

/// Borrow an option bag as an object, treating `null` as empty.
pub fn options_object(
    middleware: &str,
    options: &Value,
) -> Result<serde_json::Map<String, Value>, PresetError> {
    match options {
        Value::Null => Ok(serde_json::Map::new()),
        Value::Object(map) => Ok(map.clone()),
        other => Err(PresetError::config(
            middleware,
            format!("options must be an object, found `{}`", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default, deny_unknown_fields)]
    struct Sample {
        flag: bool,
        name: Option<String>,
    }

    #[test]
    fn test_decode_null_is_default() {
        let sample: Sample = decode_options("sample", &Value::Null).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_decode_reports_middleware() {
        let err = decode_options::<Sample>("sample", &json!({ "flag": "yes" })).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().starts_with("sample: invalid options"));

        let err = decode_options::<Sample>("sample", &json!({ "other": 1 })).unwrap_err();
        assert!(err.to_string().contains("other"));
    }

    #[test]
    fn test_options_object() {
        assert!(options_object("m", &Value::Null).unwrap().is_empty());
        assert_eq!(options_object("m", &json!({ "a": 1 })).unwrap().len(), 1);
        assert!(options_object("m", &json!([1])).is_err());
    }
}
