//! Option bag merging.
//!
//! Option bags are [`serde_json::Value`] trees. The default strategy merges
//! objects recursively and lets arrays from the override replace arrays from
//! the base. A JSON `null` in the override means "not supplied" and keeps the
//! base value.

use serde_json::{Map, Value};

use crate::core::errors::PresetError;

/// How arrays present on both sides are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// The override array replaces the base array.
    #[default]
    Replace,
    /// Base elements first, then override elements not already present.
    Append,
}

/// Merge `over` into `base` with [`MergeStrategy::Replace`].
///
/// Neither input is modified.
pub fn merge(base: &Value, over: &Value) -> Value {
    merge_with(base, over, MergeStrategy::Replace)
}

/// Merge `over` into `base` with the given array strategy.
pub fn merge_with(base: &Value, over: &Value, strategy: MergeStrategy) -> Value {
    match (base, over) {
        (_, Value::Null) => base.clone(),
        (Value::Object(b), Value::Object(o)) => Value::Object(merge_objects(b, o, strategy)),
        (Value::Array(b), Value::Array(o)) if strategy == MergeStrategy::Append => {
            let mut merged = b.clone();
            for item in o {
                if !merged.contains(item) {
                    merged.push(item.clone());
                }
            }
            Value::Array(merged)
        }
        _ => over.clone(),
    }
}

fn merge_objects(
    base: &Map<String, Value>,
    over: &Map<String, Value>,
    strategy: MergeStrategy,
) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in over {
        let next = match base.get(key) {
            Some(existing) => merge_with(existing, value, strategy),
            None if value.is_null() => continue,
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}

/// Merge compiler (Babel-style) options.
///
/// Preset and plugin lists accumulate instead of being replaced, so that a
/// middleware can put its plugins ahead of the ones already configured.
pub fn merge_compile_options(base: &Value, over: &Value) -> Value {
    merge_with(base, over, MergeStrategy::Append)
}

/// Merge like [`merge`], but reject a mapping meeting a non-mapping.
pub fn merge_strict(base: &Value, over: &Value) -> Result<Value, PresetError> {
    check_shapes(base, over, "")?;
    Ok(merge(base, over))
}

fn check_shapes(base: &Value, over: &Value, path: &str) -> Result<(), PresetError> {
    match (base, over) {
        (_, Value::Null) | (Value::Null, _) => Ok(()),
        (Value::Object(b), Value::Object(o)) => {
            for (key, value) in o {
                if let Some(existing) = b.get(key) {
                    let child = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", path, key)
                    };
                    check_shapes(existing, value, &child)?;
                }
            }
            Ok(())
        }
        (Value::Object(_), other) | (other, Value::Object(_)) if !other.is_object() => {
            Err(PresetError::MergeType {
                path: if path.is_empty() { "<root>".to_string() } else { path.to_string() },
                expected: kind(base).to_string(),
                found: kind(over).to_string(),
            })
        }
        _ => Ok(()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
