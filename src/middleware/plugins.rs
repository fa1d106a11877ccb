//! Small plugin-installing middlewares.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::errors::PresetError;
use crate::core::plugin::PluginArg;
use crate::middleware::{decode_options, Api, Middleware};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CopyOptions {
    patterns: Vec<Value>,
    options: Value,
}

/// Copies static files into the output directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyFiles;

impl Middleware for CopyFiles {
    fn name(&self) -> &str {
        "copy"
    }

    fn description(&self) -> &str {
        "Copy static files into the output directory"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let opts: CopyOptions = decode_options(self.name(), options)?;
        let copy_options = if opts.options.is_null() {
            json!({ "logLevel": "warn" })
        } else {
            opts.options
        };

        api.config.plugins.plugin("copy").args([
            PluginArg::from(Value::Array(opts.patterns)),
            PluginArg::from(copy_options),
        ]);
        Ok(())
    }
}

/// Default banner: installs source map support in Node bundles.
pub const SOURCE_MAP_BANNER: &str = "require('source-map-support').install();";

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct BannerOptions {
    banner: String,
    raw: bool,
    entry_only: bool,
}

impl Default for BannerOptions {
    fn default() -> Self {
        BannerOptions {
            banner: SOURCE_MAP_BANNER.to_string(),
            raw: true,
            entry_only: true,
        }
    }
}

/// Prepends a banner to each entry file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Banner;

impl Middleware for Banner {
    fn name(&self) -> &str {
        "banner"
    }

    fn description(&self) -> &str {
        "Prepend a banner (source map support by default) to entry files"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let opts: BannerOptions = decode_options(self.name(), options)?;
        api.config.plugins.plugin("banner").args([PluginArg::from(json!({
            "banner": opts.banner,
            "raw": opts.raw,
            "entryOnly": opts.entry_only,
        }))]);
        Ok(())
    }
}

/// Forwards extra environment variable names to the `env` plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvVars;

impl Middleware for EnvVars {
    fn name(&self) -> &str {
        "env-vars"
    }

    fn description(&self) -> &str {
        "Expose additional environment variables to the bundle"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let names: Vec<String> = decode_options(self.name(), options)?;
        api.config.plugins.tap("env", |mut args| {
            args.extend(names.into_iter().map(|name| PluginArg::from(json!(name))));
            args
        });
        Ok(())
    }
}
