//! Linting middlewares.
//!
//! Linting always extends a base lint middleware (`airbnb-base`, `airbnb`).
//! The project rule set is layered onto the base, then caller overrides are
//! merged into the installed `eslint` loader.

use serde_json::{json, Value};

use crate::core::errors::PresetError;
use crate::middleware::loader_merge::LoaderMerge;
use crate::middleware::rules::{eslint_options, LintFlavor};
use crate::middleware::{Api, Middleware};

/// Validated `use` pair.
#[derive(Debug, Clone, PartialEq)]
struct UsePair {
    base: String,
    overrides: Value,
}

fn parse_use(middleware: &str, api: &Api, options: &Value) -> Result<UsePair, PresetError> {
    let value = options.get("use").unwrap_or(&Value::Null);

    let items = match value {
        Value::Null => {
            return Err(PresetError::config(
                middleware,
                "The linting middleware requires a base middleware to extend",
            ))
        }
        Value::Array(items) if !items.is_empty() && items.len() <= 2 => items,
        _ => {
            return Err(PresetError::config(
                middleware,
                "The linting middleware requires an array pair of [base, overrides]",
            ))
        }
    };

    let base = items[0].as_str().ok_or_else(|| {
        PresetError::config(
            middleware,
            "the base in `use` must be the name of a lint middleware",
        )
    })?;
    if !api.registry().contains(base) {
        return Err(PresetError::config(
            middleware,
            format!("unknown base lint middleware `{}`", base),
        ));
    }

    let overrides = items.get(1).cloned().unwrap_or(Value::Null);
    if !overrides.is_null() && !overrides.is_object() {
        return Err(PresetError::config(
            middleware,
            "lint overrides in `use` must be an object",
        ));
    }

    Ok(UsePair {
        base: base.to_string(),
        overrides,
    })
}

fn apply_lint(api: &mut Api, flavor: LintFlavor, pair: UsePair) -> Result<(), PresetError> {
    let eslint = eslint_options(flavor, &api.env);
    api.use_named(&pair.base, json!({ "eslint": eslint }))?;

    if !pair.overrides.is_null() {
        api.use_middleware(&LoaderMerge::new("lint", "eslint"), pair.overrides)?;
    }
    Ok(())
}

/// Project lint rules on top of a required base.
///
/// Options: `{ "use": [base, overrides?] }`. Everything is validated before
/// the configuration is touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lint;

impl Middleware for Lint {
    fn name(&self) -> &str {
        "lint"
    }

    fn description(&self) -> &str {
        "Project lint rules layered on a base lint middleware"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let pair = parse_use(self.name(), api, options)?;
        apply_lint(api, LintFlavor::Base, pair)
    }
}

/// React flavour of [`Lint`].
///
/// Options are the caller's eslint overrides; the base is `airbnb` unless the
/// bag carries its own `use` pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactLint;

impl Middleware for ReactLint {
    fn name(&self) -> &str {
        "react-lint"
    }

    fn description(&self) -> &str {
        "React lint rules layered on `airbnb`"
    }

    fn apply(&self, api: &mut Api, options: &Value) -> Result<(), PresetError> {
        let pair = if options.get("use").is_some() {
            parse_use(self.name(), api, options)?
        } else {
            if !options.is_null() && !options.is_object() {
                return Err(PresetError::config(self.name(), "overrides must be an object"));
            }
            UsePair {
                base: LintFlavor::React.default_base().to_string(),
                overrides: options.clone(),
            }
        };
        apply_lint(api, LintFlavor::React, pair)
    }
}
