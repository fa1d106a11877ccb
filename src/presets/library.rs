use serde_json::Value;

use crate::core::errors::PresetError;
use crate::middleware::library::Library;
use crate::middleware::{Api, Middleware};

/// React library preset: the `library` middleware with its full option set.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryPreset;

impl Middleware for LibraryPreset {
    fn name(&self) -> &str {
        "library-preset"
    }

    fn description(&self) -> &str {
        "React library or component kit packaged as UMD"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        api.use_middleware(&Library, options.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::environment::{Command, Environment, Mode};
    use crate::core::project::ProjectOptions;

    #[test]
    fn test_delegates_to_library() {
        let mut api = Api::new(
            ProjectOptions::with_root("/lib"),
            Environment::new(Mode::Production, Command::Build),
        )
        .with_manifest_reader(Box::new(crate::test_support::MockFileSystem::new()));
        api.use_middleware(&LibraryPreset, json!({ "library": "Widgets" })).unwrap();

        assert_eq!(api.run_list()[..2], ["library-preset", "library"]);
        assert_eq!(api.config.output.library.as_deref(), Some("Widgets"));
    }
}
