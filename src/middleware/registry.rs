//! Middleware registry - named lookup of composition steps.
//!
//! Registry construction never fails and does no I/O. Option bags refer to
//! base middlewares by name, so anything a preset can delegate to must be
//! registered here.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::middleware::base::{
    Airbnb, AirbnbBase, CompileLoader, Node, React, ReactComponents, StyleLoader, Web,
};
use crate::middleware::decorators::Decorators;
use crate::middleware::devtool::DevtoolSelection;
use crate::middleware::library::Library;
use crate::middleware::lint::{Lint, ReactLint};
use crate::middleware::loader_merge::LoaderMerge;
use crate::middleware::local_modules::LocalModules;
use crate::middleware::plugins::{Banner, CopyFiles, EnvVars};
use crate::middleware::versioning::Versioning;
use crate::middleware::Middleware;
use crate::presets::{LibraryPreset, NodePreset, ReactComponentsPreset, ReactPreset};

/// Registry of named middlewares.
#[derive(Clone, Default)]
pub struct MiddlewareRegistry {
    middlewares: BTreeMap<String, Rc<dyn Middleware>>,
}

impl MiddlewareRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        MiddlewareRegistry::default()
    }

    /// Create a registry with every built-in middleware and preset.
    pub fn with_builtins() -> Self {
        let mut registry = MiddlewareRegistry::new();

        // Base presets
        registry.register(CompileLoader);
        registry.register(StyleLoader);
        registry.register(Web);
        registry.register(React);
        registry.register(Node);
        registry.register(ReactComponents);
        registry.register(AirbnbBase);
        registry.register(Airbnb);

        // Middlewares
        registry.register(LoaderMerge::new("lint", "eslint"));
        registry.register(LoaderMerge::new("compile", "babel"));
        registry.register(CopyFiles);
        registry.register(Banner);
        registry.register(EnvVars);
        registry.register(Lint);
        registry.register(ReactLint);
        registry.register(Decorators);
        registry.register(DevtoolSelection);
        registry.register(Versioning);
        registry.register(LocalModules);
        registry.register(Library);

        // Presets
        registry.register(NodePreset);
        registry.register(ReactPreset);
        registry.register(ReactComponentsPreset);
        registry.register(LibraryPreset);

        registry
    }

    /// Register a middleware under its own name, replacing any previous one.
    pub fn register<M: Middleware + 'static>(&mut self, middleware: M) {
        let name = middleware.name().to_string();
        self.middlewares.insert(name, Rc::new(middleware));
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn Middleware>> {
        self.middlewares.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.middlewares.contains_key(name)
    }

    /// All registered middlewares, sorted by name.
    pub fn all(&self) -> impl Iterator<Item = &dyn Middleware> + '_ {
        self.middlewares.values().map(|m| m.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.middlewares.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }
}
