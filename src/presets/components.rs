use serde_json::Value;

use super::PresetOptions;
use crate::core::errors::PresetError;
use crate::middleware::base::ReactComponents;
use crate::middleware::decorators::Decorators;
use crate::middleware::devtool::DevtoolSelection;
use crate::middleware::lint::ReactLint;
use crate::middleware::local_modules::LocalModules;
use crate::middleware::plugins::CopyFiles;
use crate::middleware::{Api, Middleware};

/// React component kit preset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactComponentsPreset;

impl Middleware for ReactComponentsPreset {
    fn name(&self) -> &str {
        "react-components-preset"
    }

    fn description(&self) -> &str {
        "React component kit: one UMD entry per component, stories on start"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let opts = PresetOptions::parse(self.name(), options)?;

        api.use_middleware(&CopyFiles, opts.get("copy"))?;
        api.use_middleware(&ReactLint, opts.eslint.clone())?;
        api.use_middleware(&ReactComponents, Value::Object(opts.all.clone()))?;
        api.use_middleware(&DevtoolSelection, Value::Null)?;
        api.use_middleware(&Decorators, Value::Null)?;
        api.use_middleware(&LocalModules, Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;
    use crate::core::configuration::{Devtool, External};
    use crate::core::environment::{Command, Environment, Mode};
    use crate::core::project::ProjectOptions;
    use crate::test_support::MockFileSystem;

    fn api(mode: Mode, command: Command) -> Api {
        let mut fs = MockFileSystem::new();
        fs.add_file("/kit/src/components/Avatar.js", "");
        fs.add_file("/kit/src/components/Badge.js", "");
        Api::new(ProjectOptions::with_root("/kit"), Environment::new(mode, command))
            .with_lister(Box::new(fs.clone()))
            .with_manifest_reader(Box::new(fs))
    }

    #[test]
    fn test_build_packages_components() {
        let mut api = api(Mode::Production, Command::Build);
        api.use_middleware(&ReactComponentsPreset, Value::Null).unwrap();

        let config = &api.config;
        assert_eq!(config.entry_points.names(), vec!["Avatar", "Badge"]);
        assert_eq!(config.output.path, Some(PathBuf::from("/kit/lib")));
        assert_eq!(config.output.library_target.as_deref(), Some("umd"));
        assert_eq!(config.externals, vec![External::NodeModules]);
        assert!(config.plugins.has("copy"));
        assert!(!config.plugins.has("html"));
        assert!(!config.plugins.has("runtime-chunk"));
        // Packaging picks source maps first; the devtool step runs after it.
        assert_eq!(config.devtool, Devtool::named("source-map"));
    }

    #[test]
    fn test_lint_comes_from_react_lint_only() {
        let mut api = api(Mode::Production, Command::Build);
        api.use_middleware(
            &ReactComponentsPreset,
            json!({ "eslint": { "rules": { "no-shadow": "error" } } }),
        )
        .unwrap();

        let lint_runs = api
            .run_list()
            .iter()
            .filter(|name| name.as_str() == "airbnb")
            .count();
        assert_eq!(lint_runs, 1);

        let eslint = &api.config.module.get("lint").unwrap().get_use("eslint").unwrap().options;
        assert_eq!(eslint["rules"]["no-shadow"], "error");
        assert_eq!(eslint["rules"]["max-len"][1], 120);
    }

    #[test]
    fn test_start_uses_stories() {
        let mut api = api(Mode::Development, Command::Start);
        api.use_middleware(&ReactComponentsPreset, Value::Null).unwrap();

        assert_eq!(
            api.config.entry_points.get("index").unwrap(),
            [PathBuf::from("/kit/src/stories")]
        );
        assert_eq!(api.config.devtool, Devtool::named("eval-source-map"));
    }

    #[test]
    fn test_decorators_after_compile_rule() {
        let mut api = api(Mode::Production, Command::Build);
        api.use_middleware(&ReactComponentsPreset, Value::Null).unwrap();

        let babel = &api.config.module.get("compile").unwrap().get_use("babel").unwrap().options;
        assert_eq!(babel["plugins"][0][0], "@babel/plugin-proposal-decorators");
        assert_eq!(
            api.config.module.get("compile").unwrap().use_names(),
            vec!["cache", "babel"]
        );
    }
}
