//! Cache-busting output filenames.

use serde::Deserialize;
use serde_json::Value;

use crate::core::environment::Condition;
use crate::core::errors::PresetError;
use crate::core::plugin::PluginArg;
use crate::middleware::{decode_options, Api, Middleware};
use crate::util::template::{
    rename_chunk, render_filename, DEFAULT_CACHE_VERSION, DEFAULT_PATTERN,
};

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct VersioningOptions {
    /// Version tag embedded in every emitted filename.
    pub cache_version: String,
    /// Condition under which versioned names are used.
    pub when: Condition,
    /// Filename template; `[version]` is replaced with `cache_version`.
    pub pattern: String,
}

impl Default for VersioningOptions {
    fn default() -> Self {
        VersioningOptions {
            cache_version: DEFAULT_CACHE_VERSION.to_string(),
            when: Condition::IsProduction,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

/// Embeds a cache version in entry and chunk filenames.
///
/// Entry and chunk files share one template so both bust together. Anonymous
/// chunks get the version through the `named-chunks` namer when the target
/// installs one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Versioning;

impl Middleware for Versioning {
    fn name(&self) -> &str {
        "versioning"
    }

    fn description(&self) -> &str {
        "Versioned, content-hashed output and chunk filenames"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let opts: VersioningOptions = decode_options(self.name(), options)?;
        let version = opts.cache_version.trim();
        if version.is_empty() {
            return Err(PresetError::config(self.name(), "`cacheVersion` must not be empty"));
        }
        if version.contains('/') {
            return Err(PresetError::config(
                self.name(),
                format!("`cacheVersion` must not contain `/`, found `{}`", version),
            ));
        }

        let enabled = api.env.check(opts.when);
        tracing::debug!("versioning {} ({})", if enabled { "on" } else { "off" }, opts.when);

        api.config.when(enabled, |config| {
            let filename = render_filename(&opts.pattern, version);
            config
                .output
                .filename(filename.clone())
                .chunk_filename(filename);
            if !config.plugins.has("named-chunks") {
                return;
            }
            config.plugins.tap("named-chunks", |args| {
                let namer = args.iter().find_map(PluginArg::as_namer).cloned();
                match namer {
                    Some(namer) => vec![PluginArg::Namer(rename_chunk(namer, version))],
                    None => args,
                }
            });
        });
        Ok(())
    }
}
