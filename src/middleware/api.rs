//! The composition context handed to every middleware.

use serde_json::Value;

use crate::core::configuration::Configuration;
use crate::core::environment::Environment;
use crate::core::errors::PresetError;
use crate::core::project::ProjectOptions;
use crate::middleware::{Middleware, MiddlewareRegistry};
use crate::util::fs::{DirectoryLister, FsDirectoryLister, FsManifestReader, ManifestReader};

/// Single owned context for one composition pass.
///
/// Middlewares run strictly in the order they are used. Each may read and
/// overwrite anything earlier middlewares produced.
pub struct Api {
    /// Configuration under construction.
    pub config: Configuration,

    /// Project layout; middlewares may adjust it for later steps.
    pub options: ProjectOptions,

    /// Environment snapshot for this pass.
    pub env: Environment,

    registry: MiddlewareRegistry,
    lister: Box<dyn DirectoryLister>,
    manifest_reader: Box<dyn ManifestReader>,
    run_list: Vec<String>,
}

impl Api {
    /// Create a context with the built-in registry and real filesystem access.
    pub fn new(options: ProjectOptions, env: Environment) -> Self {
        Api {
            config: Configuration::new(),
            options,
            env,
            registry: MiddlewareRegistry::with_builtins(),
            lister: Box::new(FsDirectoryLister),
            manifest_reader: Box::new(FsManifestReader),
            run_list: Vec::new(),
        }
    }

    /// Replace the middleware registry.
    pub fn with_registry(mut self, registry: MiddlewareRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the directory lister.
    pub fn with_lister(mut self, lister: Box<dyn DirectoryLister>) -> Self {
        self.lister = lister;
        self
    }

    /// Replace the manifest reader.
    pub fn with_manifest_reader(mut self, reader: Box<dyn ManifestReader>) -> Self {
        self.manifest_reader = reader;
        self
    }

    /// Append a middleware to the run list and apply it immediately.
    ///
    /// The first error aborts; it is wrapped with the middleware's name.
    pub fn use_middleware(
        &mut self,
        middleware: &dyn Middleware,
        options: Value,
    ) -> Result<(), PresetError> {
        let name = middleware.name().to_string();
        self.run_list.push(name.clone());
        tracing::debug!("applying middleware `{}`", name);

        middleware
            .apply(self, &options)
            .map_err(|e| PresetError::Middleware {
                middleware: name,
                source: Box::new(e),
            })
    }

    /// Look up a registered middleware by name and apply it.
    pub fn use_named(&mut self, name: &str, options: Value) -> Result<(), PresetError> {
        let middleware = self
            .registry
            .get(name)
            .ok_or_else(|| PresetError::UnknownMiddleware(name.to_string()))?;
        self.use_middleware(middleware.as_ref(), options)
    }

    pub fn registry(&self) -> &MiddlewareRegistry {
        &self.registry
    }

    pub fn lister(&self) -> &dyn DirectoryLister {
        self.lister.as_ref()
    }

    pub fn manifest_reader(&self) -> &dyn ManifestReader {
        self.manifest_reader.as_ref()
    }

    /// Names of the middlewares applied so far, in order.
    pub fn run_list(&self) -> &[String] {
        &self.run_list
    }

    /// Finish the pass and hand back the configuration.
    pub fn into_configuration(self) -> Configuration {
        self.config
    }

    /// Finish the pass, keeping the run list.
    pub fn into_parts(self) -> (Configuration, Vec<String>) {
        (self.config, self.run_list)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::environment::{Command, Mode};
    use crate::core::plugin::PluginArg;

    struct Install;

    impl Middleware for Install {
        fn name(&self) -> &str {
            "install"
        }

        fn apply(&self, api: &mut Api, _options: &Value) -> Result<(), PresetError> {
            api.config.plugins.plugin("runtime-chunk").args([PluginArg::from(json!({}))]);
            Ok(())
        }
    }

    struct Remove;

    impl Middleware for Remove {
        fn name(&self) -> &str {
            "remove"
        }

        fn apply(&self, api: &mut Api, _options: &Value) -> Result<(), PresetError> {
            api.config.plugins.delete("runtime-chunk");
            Ok(())
        }
    }

    struct Fail;

    impl Middleware for Fail {
        fn name(&self) -> &str {
            "fail"
        }

        fn apply(&self, _api: &mut Api, _options: &Value) -> Result<(), PresetError> {
            Err(PresetError::config("fail", "bad option `x`"))
        }
    }

    fn api() -> Api {
        Api::new(
            ProjectOptions::with_root("/project"),
            Environment::new(Mode::Production, Command::Build),
        )
    }

    #[test]
    fn test_order_install_then_remove() {
        let mut api = api();
        api.use_middleware(&Install, Value::Null).unwrap();
        api.use_middleware(&Remove, Value::Null).unwrap();

        assert!(!api.config.plugins.has("runtime-chunk"));
        assert_eq!(api.run_list(), ["install", "remove"]);
    }

    #[test]
    fn test_order_remove_then_install() {
        let mut api = api();
        api.use_middleware(&Remove, Value::Null).unwrap();
        api.use_middleware(&Install, Value::Null).unwrap();

        assert!(api.config.plugins.has("runtime-chunk"));
        assert_eq!(api.run_list(), ["remove", "install"]);
    }

    #[test]
    fn test_no_dedup() {
        let mut api = api();
        api.use_middleware(&Install, Value::Null).unwrap();
        api.use_middleware(&Install, Value::Null).unwrap();
        assert_eq!(api.run_list(), ["install", "install"]);
        assert_eq!(api.config.plugins.len(), 1);
    }

    #[test]
    fn test_error_names_middleware() {
        let mut api = api();
        let err = api.use_middleware(&Fail, Value::Null).unwrap_err();
        assert_eq!(err.middleware_chain(), vec!["fail"]);
        assert!(err.root_cause().to_string().contains("bad option `x`"));
    }

    #[test]
    fn test_use_named_unknown() {
        let mut api = api();
        let err = api.use_named("does-not-exist", Value::Null).unwrap_err();
        assert!(matches!(err, PresetError::UnknownMiddleware(_)));
        assert!(api.run_list().is_empty());
    }
}
