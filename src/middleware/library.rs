//! Library and component kit packaging.
//!
//! Turns a React application setup into a distributable package: UMD output
//! under `lib`, one entry per component, dependencies left external and the
//! application-only plugins removed.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::configuration::{Devtool, External};
use crate::core::environment::{Command, Condition};
use crate::core::errors::PresetError;
use crate::middleware::loader_merge::LoaderMerge;
use crate::middleware::local_modules::LocalModules;
use crate::middleware::plugins::{Banner, EnvVars};
use crate::middleware::rules::{eslint_options, LintFlavor};
use crate::middleware::{decode_options, Api, Middleware};
use crate::util::fs::probe_dependency;
use crate::util::merge::merge_compile_options;

/// Dependency whose presence enables the source map support banner.
pub const SOURCE_MAP_SUPPORT: &str = "source-map-support";

/// Output directory for packaged builds.
pub const LIBRARY_OUTPUT: &str = "lib";

/// Entry used by `start` for component kits.
pub const STORIES_ENTRY: &str = "stories";

/// Plugins that only make sense for applications with a runtime chunk.
pub const CHUNK_PLUGINS: &[&str] = &[
    "runtime-chunk",
    "vendor-chunk",
    "named-modules",
    "named-chunks",
    "name-all",
];

/// Browsers targeted by packaged builds.
pub const LIBRARY_BROWSERS: &[&str] = &[
    "last 1 Chrome versions",
    "last 1 Firefox versions",
    "last 1 Edge versions",
    "last 1 Safari versions",
    "last 1 iOS versions",
];

/// `library` option: off, on with the default name, or an explicit name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LibraryName {
    Enabled(bool),
    Named(String),
}

impl Default for LibraryName {
    fn default() -> Self {
        LibraryName::Enabled(false)
    }
}

impl LibraryName {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, LibraryName::Enabled(false))
    }

    /// UMD export name; `[name]` exports each entry under its own name.
    pub fn export_name(&self) -> String {
        match self {
            LibraryName::Named(name) => name.clone(),
            LibraryName::Enabled(_) => "[name]".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LibraryOptions {
    pub components: bool,
    pub library: LibraryName,
    pub css_modules: bool,
    pub envs: Vec<String>,
    pub react: Value,
    pub eslint: Value,
    /// Install the library lint rules.
    pub lint: bool,
}

impl Default for LibraryOptions {
    fn default() -> Self {
        LibraryOptions {
            components: false,
            library: LibraryName::default(),
            css_modules: false,
            envs: Vec::new(),
            react: Value::Null,
            eslint: Value::Null,
            lint: true,
        }
    }
}

impl LibraryOptions {
    fn packaging(&self) -> bool {
        self.components || self.library.is_enabled()
    }
}

/// React application, library or component kit packaging.
#[derive(Debug, Clone, Copy, Default)]
pub struct Library;

impl Middleware for Library {
    fn name(&self) -> &str {
        "library"
    }

    fn description(&self) -> &str {
        "React application with optional library or component kit packaging"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let opts: LibraryOptions = decode_options(self.name(), options)?;
        let react = react_options(self.name(), &opts)?;
        if !opts.eslint.is_null() && !opts.eslint.is_object() {
            return Err(PresetError::config(self.name(), "`eslint` must be an object"));
        }
        let packaging = opts.packaging();

        if packaging && api.options.output.to_string_lossy().ends_with("build") {
            api.options.output = PathBuf::from(LIBRARY_OUTPUT);

            let manifest = api.options.manifest_path();
            if probe_dependency(api.manifest_reader(), &manifest, SOURCE_MAP_SUPPORT) {
                api.use_middleware(&Banner, Value::Null)?;
            }
        }

        api.use_middleware(&LocalModules, Value::Null)?;

        if opts.lint {
            let eslint = eslint_options(LintFlavor::Library, &api.env);
            api.use_named(LintFlavor::Library.default_base(), json!({ "eslint": eslint }))?;
        }
        if !opts.eslint.is_null() {
            api.use_middleware(&LoaderMerge::new("lint", "eslint"), opts.eslint.clone())?;
        }

        if opts.css_modules {
            install_css_modules(api);
        }

        api.use_named("react", react)?;

        if !opts.envs.is_empty() {
            api.use_middleware(&EnvVars, json!(opts.envs))?;
        }

        api.config
            .module
            .rule("compile")
            .use_before("cache", "babel")
            .loader("cache-loader");

        if opts.components {
            component_entries(api)?;
        }

        if packaging {
            package(api, &opts.library);
        }
        Ok(())
    }
}

fn react_options(middleware: &str, opts: &LibraryOptions) -> Result<Value, PresetError> {
    let mut react = match &opts.react {
        Value::Null => serde_json::Map::new(),
        Value::Object(map) => map.clone(),
        _ => return Err(PresetError::config(middleware, "`react` must be an object")),
    };

    if opts.packaging() {
        if opts.components {
            react.insert("html".to_string(), json!({ "title": "React Preview" }));
        } else {
            react.remove("html");
        }

        let babel = react.remove("babel").unwrap_or(Value::Null);
        if !babel.is_null() && !babel.is_object() {
            return Err(PresetError::config(middleware, "`react.babel` must be an object"));
        }
        let env_preset = json!({
            "presets": [[
                "babel-preset-env",
                { "targets": { "browsers": LIBRARY_BROWSERS } }
            ]]
        });
        let base = if babel.is_null() { json!({}) } else { babel };
        react.insert("babel".to_string(), merge_compile_options(&base, &env_preset));
    }

    Ok(Value::Object(react))
}

fn install_css_modules(api: &mut Api) {
    let node_modules = api.options.node_modules_dir();

    let plain = api.config.module.rule("plain-style");
    plain.test(r"\.css$").include(node_modules.clone());
    plain.use_entry("style").loader("style-loader");
    plain.use_entry("css").loader("css-loader");

    let style = api.config.module.rule("style");
    style.exclude(node_modules);
    style.use_entry("css").options(json!({ "modules": true }));
}

/// Strip a trailing `.js` from a file name.
fn entry_name(path: &Path) -> String {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file.strip_suffix(".js") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => file,
    }
}

fn component_entries(api: &mut Api) -> Result<(), PresetError> {
    if api.env.command() == Command::Start {
        api.options.entry = STORIES_ENTRY.to_string();
        let stories = api.options.entry_path();
        api.config.entry_points.delete("index").add("index", stories);
        return Ok(());
    }

    let dir = api.options.source_dir().join("components");
    let files = api
        .lister()
        .list(&dir)
        .map_err(|source| PresetError::Io {
            path: dir.clone(),
            source,
        })?;

    api.config.entry_points.delete("index");
    for file in files {
        let name = entry_name(&file);
        api.config.entry_points.add(&name, file);
    }
    Ok(())
}

fn package(api: &mut Api, library: &LibraryName) {
    let not_test = !api.env.check(Condition::IsTestEnv);
    let has_runtime_chunk = api.config.plugins.has("runtime-chunk");

    api.config.devtool(Devtool::named("source-map"));
    api.config.performance.hints = Some("warning".to_string());
    api.config
        .output
        .filename("[name].js")
        .library(library.export_name())
        .library_target("umd")
        .umd_named_define(true);

    api.config
        .when(not_test, |c| {
            c.plugins.delete("html");
            c.add_external(External::NodeModules);
        })
        .when(has_runtime_chunk, |c| {
            for plugin in CHUNK_PLUGINS {
                c.plugins.delete(plugin);
            }
        });
}
