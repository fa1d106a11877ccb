//! Plugin registry.
//!
//! Plugins are keyed entries holding their construction arguments. Later
//! middlewares may tap (transform) the arguments or delete the entry.

use std::fmt;
use std::rc::Rc;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// A chunk as seen by the bundler's chunk-naming hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    /// Explicit name, if the chunk was given one.
    pub name: Option<String>,
    /// Bundler-assigned identifier.
    pub id: String,
    /// Module request paths contained in the chunk.
    pub modules: Vec<String>,
}

impl Chunk {
    pub fn named(name: impl Into<String>) -> Self {
        Chunk {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn anonymous(id: impl Into<String>) -> Self {
        Chunk {
            name: None,
            id: id.into(),
            modules: Vec::new(),
        }
    }
}

/// A chunk naming function.
#[derive(Clone)]
pub struct ChunkNamer(Rc<dyn Fn(&Chunk) -> String>);

impl ChunkNamer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Chunk) -> String + 'static,
    {
        ChunkNamer(Rc::new(f))
    }

    pub fn call(&self, chunk: &Chunk) -> String {
        (self.0)(chunk)
    }
}

impl fmt::Debug for ChunkNamer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChunkNamer(<fn>)")
    }
}

/// Default naming used by the `named-chunks` plugin: the chunk name, or the
/// id joined with the file stems of its modules.
pub fn default_chunk_namer() -> ChunkNamer {
    ChunkNamer::new(|chunk| {
        if let Some(name) = &chunk.name {
            return name.clone();
        }
        let stems: Vec<&str> = chunk
            .modules
            .iter()
            .filter_map(|m| {
                std::path::Path::new(m)
                    .file_stem()
                    .and_then(|s| s.to_str())
            })
            .collect();
        if stems.is_empty() {
            format!("{}.js", chunk.id)
        } else {
            format!("{}.js", stems.join("~"))
        }
    })
}

/// A plugin construction argument.
#[derive(Debug, Clone)]
pub enum PluginArg {
    Value(Value),
    Namer(ChunkNamer),
}

impl PluginArg {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            PluginArg::Value(v) => Some(v),
            PluginArg::Namer(_) => None,
        }
    }

    pub fn as_namer(&self) -> Option<&ChunkNamer> {
        match self {
            PluginArg::Namer(n) => Some(n),
            PluginArg::Value(_) => None,
        }
    }
}

impl From<Value> for PluginArg {
    fn from(value: Value) -> Self {
        PluginArg::Value(value)
    }
}

impl Serialize for PluginArg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PluginArg::Value(v) => v.serialize(serializer),
            PluginArg::Namer(_) => serializer.serialize_str("[function]"),
        }
    }
}

/// A keyed plugin entry.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PluginEntry {
    pub name: String,
    pub args: Vec<PluginArg>,
}

impl PluginEntry {
    pub fn new(name: impl Into<String>) -> Self {
        PluginEntry {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Replace the construction arguments.
    pub fn args<I>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = PluginArg>,
    {
        self.args = args.into_iter().collect();
        self
    }

    /// Transform the construction arguments.
    pub fn tap<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(Vec<PluginArg>) -> Vec<PluginArg>,
    {
        let args = std::mem::take(&mut self.args);
        self.args = f(args);
        self
    }
}

/// Ordered registry of plugin entries.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    entries: Vec<PluginEntry>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        PluginRegistry::default()
    }

    /// Get or create the plugin with the given name.
    pub fn plugin(&mut self, name: &str) -> &mut PluginEntry {
        let idx = match self.position(name) {
            Some(idx) => idx,
            None => {
                self.entries.push(PluginEntry::new(name));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx]
    }

    /// Transform a plugin's arguments, creating it if absent.
    pub fn tap<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: FnOnce(Vec<PluginArg>) -> Vec<PluginArg>,
    {
        self.plugin(name).tap(f);
        self
    }

    /// Remove a plugin if present.
    pub fn delete(&mut self, name: &str) -> &mut Self {
        self.entries.retain(|e| e.name != name);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&PluginEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }
}

impl Serialize for PluginRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.args)?;
        }
        map.end()
    }
}
