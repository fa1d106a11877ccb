//! Source map selection.

use serde_json::Value;

use crate::core::configuration::{Configuration, Devtool};
use crate::core::environment::{Condition, Environment};
use crate::core::errors::PresetError;
use crate::middleware::{Api, Middleware};

/// Source maps for development builds.
pub const DEVELOPMENT_DEVTOOL: &str = "eval-source-map";

/// Source maps for production builds.
pub const PRODUCTION_DEVTOOL: &str = "source-map";

/// Pick the devtool from the environment.
///
/// Production builds on CI skip source maps, except on master.
pub fn select_devtool(config: &mut Configuration, env: &Environment) {
    let skip_maps = env.check(Condition::IsCi) && !env.check(Condition::IsMasterBranch);

    config
        .when(env.check(Condition::IsDevelopment), |c| {
            c.devtool(Devtool::named(DEVELOPMENT_DEVTOOL));
        })
        .when(env.check(Condition::IsProduction), |c| {
            c.when_else(
                skip_maps,
                |c| {
                    c.devtool(Devtool::Disabled);
                },
                |c| {
                    c.devtool(Devtool::named(PRODUCTION_DEVTOOL));
                },
            );
        });
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DevtoolSelection;

impl Middleware for DevtoolSelection {
    fn name(&self) -> &str {
        "devtool"
    }

    fn description(&self) -> &str {
        "Select source maps by mode, CI flag and branch"
    }

    fn apply(&self, api: &mut Api, _options: &Value) -> Result<(), PresetError> {
        select_devtool(&mut api.config, &api.env);
        tracing::debug!("devtool: {:?}", api.config.devtool);
        Ok(())
    }
}
