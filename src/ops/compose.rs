//! Implementation of `rig build`, `rig start` and `rig test`.

use std::path::PathBuf;

use serde_json::Value;

use crate::core::configuration::Configuration;
use crate::core::environment::{Command, Environment, Mode};
use crate::core::errors::PresetError;
use crate::middleware::Api;
use crate::util::config::load_config;
use crate::util::context::GlobalContext;
use crate::util::merge::merge;

/// Preset used when neither the command line nor a config file names one.
pub const DEFAULT_PRESET: &str = "react-preset";

/// Options for a composition run.
#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    /// Command the bundler is run for
    pub command: Command,

    /// Preset name (overrides the config file)
    pub preset: Option<String>,

    /// Project root (default: searched upward from cwd)
    pub root: Option<PathBuf>,

    /// Mode (overrides `NODE_ENV`)
    pub mode: Option<Mode>,

    /// Option bag merged over the config file's options
    pub options: Value,
}

/// Result of a composition run.
#[derive(Debug)]
pub struct Composition {
    /// The composed configuration
    pub configuration: Configuration,

    /// Middlewares applied, in order
    pub run_list: Vec<String>,

    /// Environment the pass ran under
    pub environment: Environment,

    /// Preset that was applied
    pub preset: String,
}

/// Apply `preset` with `options` to a prepared context.
pub fn build(api: &mut Api, preset: &str, options: Value) -> Result<(), PresetError> {
    api.use_named(preset, options)?;
    tracing::debug!(
        "preset `{}` applied {} middlewares",
        preset,
        api.run_list().len()
    );
    Ok(())
}

/// Compose a configuration for the current process environment.
pub fn compose(ctx: &GlobalContext, opts: ComposeOptions) -> Result<Composition, PresetError> {
    let env = Environment::from_env(opts.command)?;
    compose_in(ctx, opts, env)
}

/// Compose a configuration under an explicit environment.
pub fn compose_in(
    ctx: &GlobalContext,
    opts: ComposeOptions,
    env: Environment,
) -> Result<Composition, PresetError> {
    let root = match opts.root {
        Some(root) if root.is_absolute() => root,
        Some(root) => ctx.cwd().join(root),
        None => ctx.find_project_root(),
    };

    let config = load_config(
        ctx.config_path().as_deref(),
        &ctx.project_config_path(&root),
    );

    let env = match opts.mode {
        Some(mode) => env.with_mode(mode),
        None => env,
    };
    let preset = opts
        .preset
        .or_else(|| config.preset.name.clone())
        .unwrap_or_else(|| DEFAULT_PRESET.to_string());
    let options = merge(&config.options, &opts.options);

    tracing::info!(
        "composing `{}` for {} ({}) in {}",
        preset,
        env.command(),
        env.mode(),
        root.display()
    );

    let mut api = Api::new(config.project_options(&root), env.clone());
    build(&mut api, &preset, options)?;

    let (configuration, run_list) = api.into_parts();
    Ok(Composition {
        configuration,
        run_list,
        environment: env,
        preset,
    })
}
