//! Base presets.
//!
//! These install the baseline structures that the project middlewares tap,
//! rewrite or delete: the compile and style rules, the lint rule, entry points,
//! output settings and the default plugin set.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::environment::Command;
use crate::core::errors::PresetError;
use crate::core::plugin::{default_chunk_namer, PluginArg};
use crate::middleware::{decode_options, options_object, Api, Middleware};
use crate::util::merge::{merge, merge_compile_options, merge_with, MergeStrategy};

/// Files handled by the compile and lint rules.
pub const COMPILE_TEST: &str = r"\.(mjs|jsx|js)$";

/// Files handled by the style rules.
pub const STYLE_TEST: &str = r"\.css$";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CompileOptions {
    babel: Value,
    test: Option<String>,
}

/// Installs the `compile` rule with its `babel` use.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileLoader;

impl Middleware for CompileLoader {
    fn name(&self) -> &str {
        "compile-loader"
    }

    fn description(&self) -> &str {
        "Compile rule for JavaScript sources"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let opts: CompileOptions = decode_options(self.name(), options)?;
        if !opts.babel.is_null() && !opts.babel.is_object() {
            return Err(PresetError::config(self.name(), "`babel` must be an object"));
        }

        let source = api.options.source_dir();
        let rule = api.config.module.rule("compile");
        rule.test(opts.test.as_deref().unwrap_or(COMPILE_TEST))
            .include(source);
        rule.use_entry("babel").loader("babel-loader").tap(|current| {
            let current = if current.is_null() {
                json!({ "cacheDirectory": true, "presets": [], "plugins": [] })
            } else {
                current
            };
            merge_compile_options(&current, &opts.babel)
        });
        Ok(())
    }
}

/// Installs the `style` rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleLoader;

impl Middleware for StyleLoader {
    fn name(&self) -> &str {
        "style-loader"
    }

    fn description(&self) -> &str {
        "Style rule for CSS files"
    }

    fn apply(&self, api: &mut Api, _options: &Value) -> Result<(), PresetError> {
        let rule = api.config.module.rule("style");
        rule.test(STYLE_TEST);
        rule.use_entry("style").loader("style-loader");
        // Options set by earlier middlewares win over the defaults.
        rule.use_entry("css")
            .loader("css-loader")
            .tap(|current| merge(&json!({ "importLoaders": 0 }), &current));
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WebOptions {
    babel: Value,
    html: Value,
    env: Vec<String>,
}

impl Default for WebOptions {
    fn default() -> Self {
        WebOptions {
            babel: Value::Null,
            html: Value::Null,
            env: vec!["NODE_ENV".to_string()],
        }
    }
}

/// Browser application baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Web;

impl Middleware for Web {
    fn name(&self) -> &str {
        "web"
    }

    fn description(&self) -> &str {
        "Browser application baseline: rules, entry, output and default plugins"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let opts: WebOptions = decode_options(self.name(), options)?;

        api.use_middleware(&CompileLoader, json!({ "babel": opts.babel }))?;
        api.use_middleware(&StyleLoader, Value::Null)?;

        let entry = api.options.entry_path();
        let output = api.options.output_dir();
        let html = merge(
            &json!({ "template": "index.html", "appMountId": "root", "title": "Application" }),
            &opts.html,
        );
        let start = api.env.command() == Command::Start;

        let config = &mut api.config;
        config.entry_points.add("index", entry);
        config
            .output
            .path(output)
            .filename("[name].js")
            .chunk_filename("[name].js");

        config
            .plugins
            .plugin("env")
            .args(opts.env.into_iter().map(|name| PluginArg::from(json!(name))));
        config.plugins.plugin("html").args([PluginArg::from(html)]);
        config.plugins.plugin("runtime-chunk").args([PluginArg::from(json!({ "name": "runtime" }))]);
        config.plugins.plugin("vendor-chunk").args([PluginArg::from(json!({ "name": "vendor" }))]);
        config.plugins.plugin("named-modules");
        config
            .plugins
            .plugin("named-chunks")
            .args([PluginArg::Namer(default_chunk_namer())]);
        config.plugins.plugin("name-all");
        config.when(start, |c| {
            c.plugins.plugin("hot");
        });
        Ok(())
    }
}

/// React application baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct React;

impl Middleware for React {
    fn name(&self) -> &str {
        "react"
    }

    fn description(&self) -> &str {
        "React application baseline on top of `web`"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let mut opts = options_object(self.name(), options)?;

        let babel = opts.remove("babel").unwrap_or(Value::Null);
        let babel = merge_compile_options(&json!({ "presets": ["@babel/preset-react"] }), &babel);
        opts.insert("babel".to_string(), babel);

        api.use_middleware(&Web, Value::Object(opts))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct NodeOptions {
    babel: Value,
}

/// Node.js service baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Node;

impl Middleware for Node {
    fn name(&self) -> &str {
        "node"
    }

    fn description(&self) -> &str {
        "Node.js baseline: compile rule, entry, commonjs output"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let opts: NodeOptions = decode_options(self.name(), options)?;
        let babel = merge_compile_options(
            &json!({ "presets": [["@babel/preset-env", { "targets": { "node": "current" } }]] }),
            &opts.babel,
        );
        api.use_middleware(&CompileLoader, json!({ "babel": babel }))?;

        let entry = api.options.entry_path();
        let output = api.options.output_dir();
        let start = api.env.command() == Command::Start;

        let config = &mut api.config;
        config.entry_points.add("index", entry);
        config
            .output
            .path(output)
            .filename("[name].js")
            .chunk_filename("[id].[hash:5].js")
            .library_target("commonjs2");
        config.add_external(crate::core::configuration::External::NodeModules);
        config.when(start, |c| {
            c.plugins
                .plugin("start-server")
                .args([PluginArg::from(json!({ "name": "index.js" }))]);
        });
        Ok(())
    }
}

/// React component kit baseline: `react` plus component entry points.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactComponents;

impl Middleware for ReactComponents {
    fn name(&self) -> &str {
        "react-components"
    }

    fn description(&self) -> &str {
        "React component kit: one entry per component, UMD output"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let mut opts = options_object(self.name(), options)?;
        // Lint and lint overrides are configured by the caller.
        opts.remove("eslint");
        opts.insert("components".to_string(), json!(true));
        opts.insert("lint".to_string(), json!(false));

        api.use_named("library", Value::Object(opts))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LintBaseOptions {
    eslint: Value,
}

fn install_lint_rule(
    api: &mut Api,
    name: &str,
    defaults: Value,
    options: &Value,
) -> Result<(), PresetError> {
    let opts: LintBaseOptions = decode_options(name, options)?;
    if !opts.eslint.is_null() && !opts.eslint.is_object() {
        return Err(PresetError::config(name, "`eslint` must be an object"));
    }

    let source = api.options.source_dir();
    let root = api.options.root.clone();
    let defaults = merge(
        &json!({ "cache": true, "cwd": root, "useEslintrc": false, "failOnError": false }),
        &defaults,
    );
    // Extends and plugin lists accumulate across lint layers.
    let eslint = merge_with(&defaults, &opts.eslint, MergeStrategy::Append);

    let rule = api.config.module.rule("lint");
    rule.test(COMPILE_TEST).enforce("pre").include(source);
    rule.use_entry("eslint")
        .loader("eslint-loader")
        .tap(|current| merge(&current, &eslint));
    Ok(())
}

/// Lint rule extending the Airbnb base style.
#[derive(Debug, Clone, Copy, Default)]
pub struct AirbnbBase;

impl Middleware for AirbnbBase {
    fn name(&self) -> &str {
        "airbnb-base"
    }

    fn description(&self) -> &str {
        "Lint rule with the Airbnb base style"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let defaults = json!({
            "baseConfig": { "extends": ["airbnb-base"] },
            "plugins": ["babel"]
        });
        install_lint_rule(api, self.name(), defaults, options)
    }
}

/// Lint rule extending the Airbnb style with React support.
#[derive(Debug, Clone, Copy, Default)]
pub struct Airbnb;

impl Middleware for Airbnb {
    fn name(&self) -> &str {
        "airbnb"
    }

    fn description(&self) -> &str {
        "Lint rule with the Airbnb style including React"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let defaults = json!({
            "baseConfig": { "extends": ["airbnb"] },
            "plugins": ["babel", "react"],
            "parserOptions": { "ecmaFeatures": { "jsx": true } }
        });
        install_lint_rule(api, self.name(), defaults, options)
    }
}
