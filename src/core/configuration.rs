//! The shared configuration tree.
//!
//! A single [`Configuration`] is owned by the composition context and mutated
//! in place by each middleware, in order. Subsystems are separate fields so
//! unrelated middlewares cannot collide by accident.

use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::core::errors::PresetError;
use crate::core::plugin::PluginRegistry;
use crate::core::rule::ModuleRules;

/// Source map setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Devtool {
    /// Leave the bundler default.
    #[default]
    Unset,
    /// Explicitly turn source maps off.
    Disabled,
    Named(String),
}

impl Devtool {
    pub fn named(name: impl Into<String>) -> Self {
        Devtool::Named(name.into())
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Devtool::Unset)
    }
}

impl Serialize for Devtool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Devtool::Unset => serializer.serialize_none(),
            Devtool::Disabled => serializer.serialize_bool(false),
            Devtool::Named(name) => serializer.serialize_str(name),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_target: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub umd_named_define: bool,
}

impl OutputConfig {
    pub fn filename(&mut self, filename: impl Into<String>) -> &mut Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn chunk_filename(&mut self, filename: impl Into<String>) -> &mut Self {
        self.chunk_filename = Some(filename.into());
        self
    }

    pub fn path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.path = Some(path.into());
        self
    }

    pub fn library(&mut self, name: impl Into<String>) -> &mut Self {
        self.library = Some(name.into());
        self
    }

    pub fn library_target(&mut self, target: impl Into<String>) -> &mut Self {
        self.library_target = Some(target.into());
        self
    }

    pub fn umd_named_define(&mut self, value: bool) -> &mut Self {
        self.umd_named_define = value;
        self
    }
}

/// Module search paths (ordered, without duplicates).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolveConfig {
    pub modules: Vec<PathBuf>,
}

impl ResolveConfig {
    pub fn add_module(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        let path = path.into();
        if !self.modules.contains(&path) {
            self.modules.push(path);
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<String>,
}

/// A module kept out of the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum External {
    /// Every package resolvable from `node_modules`.
    NodeModules,
    Named(String),
}

impl Serialize for External {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            External::NodeModules => serializer.serialize_str("[node_modules]"),
            External::Named(name) => serializer.serialize_str(name),
        }
    }
}

/// Ordered entry points: name to files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPoints {
    entries: Vec<(String, Vec<PathBuf>)>,
}

impl EntryPoints {
    /// Add a file to the named entry, creating it when absent.
    pub fn add(&mut self, name: &str, file: impl Into<PathBuf>) -> &mut Self {
        let file = file.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, files)) => {
                if !files.contains(&file) {
                    files.push(file);
                }
            }
            None => self.entries.push((name.to_string(), vec![file])),
        }
        self
    }

    pub fn delete(&mut self, name: &str) -> &mut Self {
        self.entries.retain(|(n, _)| n != name);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&[PathBuf]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, files)| files.as_slice())
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Serialize for EntryPoints {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, files) in &self.entries {
            map.serialize_entry(name, files)?;
        }
        map.end()
    }
}

/// Bundler configuration under construction.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(rename = "entry")]
    pub entry_points: EntryPoints,
    pub output: OutputConfig,
    #[serde(rename = "module")]
    pub module: ModuleRules,
    pub plugins: PluginRegistry,
    pub resolve: ResolveConfig,
    pub resolve_loader: ResolveConfig,
    #[serde(skip_serializing_if = "Devtool::is_unset")]
    pub devtool: Devtool,
    pub performance: PerformanceConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub externals: Vec<External>,
}

impl Configuration {
    pub fn new() -> Self {
        Configuration::default()
    }

    pub fn devtool(&mut self, devtool: Devtool) -> &mut Self {
        self.devtool = devtool;
        self
    }

    pub fn add_external(&mut self, external: External) -> &mut Self {
        if !self.externals.contains(&external) {
            self.externals.push(external);
        }
        self
    }

    /// Apply `then` only when `condition` holds.
    pub fn when<T>(&mut self, condition: bool, then: T) -> &mut Self
    where
        T: FnOnce(&mut Configuration),
    {
        if condition {
            then(self);
        }
        self
    }

    /// Apply exactly one of `then` or `otherwise`.
    pub fn when_else<T, E>(&mut self, condition: bool, then: T, otherwise: E) -> &mut Self
    where
        T: FnOnce(&mut Configuration),
        E: FnOnce(&mut Configuration),
    {
        if condition {
            then(self);
        } else {
            otherwise(self);
        }
        self
    }

    /// Fallible form of [`Configuration::when`].
    pub fn try_when<T>(&mut self, condition: bool, then: T) -> Result<&mut Self, PresetError>
    where
        T: FnOnce(&mut Configuration) -> Result<(), PresetError>,
    {
        if condition {
            then(self)?;
        }
        Ok(self)
    }

    /// Fallible form of [`Configuration::when_else`].
    pub fn try_when_else<T, E>(
        &mut self,
        condition: bool,
        then: T,
        otherwise: E,
    ) -> Result<&mut Self, PresetError>
    where
        T: FnOnce(&mut Configuration) -> Result<(), PresetError>,
        E: FnOnce(&mut Configuration) -> Result<(), PresetError>,
    {
        if condition {
            then(self)?;
        } else {
            otherwise(self)?;
        }
        Ok(self)
    }

    /// Render as a JSON value for the bundler.
    pub fn to_json(&self) -> serde_json::Value {
        // Every field serialises to plain JSON.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_when_false_skips_then() {
        let called = Cell::new(false);
        let mut config = Configuration::new();
        config.when(false, |c| {
            called.set(true);
            c.devtool(Devtool::named("source-map"));
        });

        assert!(!called.get());
        assert_eq!(config.devtool, Devtool::Unset);
    }

    #[test]
    fn test_when_else_runs_exactly_one_branch() {
        let then_calls = Cell::new(0);
        let else_calls = Cell::new(0);
        let mut config = Configuration::new();

        config.when_else(
            true,
            |c| {
                then_calls.set(then_calls.get() + 1);
                c.output.filename("then.js");
            },
            |c| {
                else_calls.set(else_calls.get() + 1);
                c.output.chunk_filename("else.js");
            },
        );

        assert_eq!(then_calls.get(), 1);
        assert_eq!(else_calls.get(), 0);
        assert_eq!(config.output.filename.as_deref(), Some("then.js"));
        assert_eq!(config.output.chunk_filename, None);
    }

    #[test]
    fn test_nested_when() {
        let mut config = Configuration::new();
        let production = true;
        let ci = true;
        let master = false;

        config.when(production, |c| {
            c.when_else(
                ci && !master,
                |c| {
                    c.devtool(Devtool::Disabled);
                },
                |c| {
                    c.devtool(Devtool::named("source-map"));
                },
            );
        });

        assert_eq!(config.devtool, Devtool::Disabled);
    }

    #[test]
    fn test_try_when_propagates_error_from_taken_branch() {
        let mut config = Configuration::new();
        let result = config.try_when_else(
            false,
            |_| Err(PresetError::config("x", "then")),
            |_| Err(PresetError::config("x", "else")),
        );
        assert_eq!(result.unwrap_err().to_string(), "x: else");

        assert!(config
            .try_when(false, |_| Err(PresetError::config("x", "never")))
            .is_ok());
    }

    #[test]
    fn test_serialize_shape() {
        let mut config = Configuration::new();
        config.entry_points.add("index", "src/index");
        config.output.filename("[name].js").umd_named_define(true);
        config.devtool(Devtool::Disabled);
        config.add_external(External::NodeModules);

        let value = config.to_json();
        assert_eq!(value["entry"], json!({ "index": ["src/index"] }));
        assert_eq!(value["output"], json!({ "filename": "[name].js", "umdNamedDefine": true }));
        assert_eq!(value["devtool"], json!(false));
        assert_eq!(value["externals"], json!(["[node_modules]"]));
        assert!(value["resolveLoader"]["modules"].is_array());
    }

    #[test]
    fn test_unset_devtool_is_omitted() {
        let value = Configuration::new().to_json();
        assert!(value.get("devtool").is_none());
    }

    #[test]
    fn test_entry_points() {
        let mut entries = EntryPoints::default();
        entries.add("index", "src/index").add("Button", "src/components/Button.js");
        entries.add("index", "src/index");

        assert_eq!(entries.names(), vec!["index", "Button"]);
        assert_eq!(entries.get("index").unwrap().len(), 1);

        entries.delete("index");
        assert!(!entries.has("index"));
    }
}
