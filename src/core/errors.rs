//! Composition error types and diagnostics.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error raised while composing a configuration.
///
/// Every variant aborts the composition pass. Nothing is rolled back; the
/// partially composed configuration must not be handed to the bundler.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum PresetError {
    #[error("{middleware}: {message}")]
    #[diagnostic(
        code(rigging::config::invalid_option),
        help("Check the options passed to `{middleware}`")
    )]
    Configuration { middleware: String, message: String },

    #[error("cannot merge {found} into {expected} at `{path}`")]
    #[diagnostic(code(rigging::merge::type_mismatch))]
    MergeType {
        path: String,
        expected: String,
        found: String,
    },

    #[error("unknown condition `{0}`")]
    #[diagnostic(
        code(rigging::env::unknown_condition),
        help("Known conditions: isDevelopment, isProduction, isCI, isMasterBranch, isBuildCommand, isStartCommand, isTestEnv")
    )]
    UnknownCondition(String),

    #[error("unknown middleware `{0}`")]
    #[diagnostic(
        code(rigging::registry::not_found),
        help("Run `rig list` to see registered middlewares")
    )]
    UnknownMiddleware(String),

    #[error("failed to read `{}`", path.display())]
    #[diagnostic(code(rigging::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("middleware `{middleware}` failed")]
    #[diagnostic(code(rigging::compose::aborted))]
    Middleware {
        middleware: String,
        #[source]
        source: Box<PresetError>,
    },
}

impl PresetError {
    /// Shorthand for a configuration-shape error raised by a middleware.
    pub fn config(middleware: impl Into<String>, message: impl Into<String>) -> Self {
        PresetError::Configuration {
            middleware: middleware.into(),
            message: message.into(),
        }
    }

    /// The innermost error, skipping middleware wrapping.
    pub fn root_cause(&self) -> &PresetError {
        match self {
            PresetError::Middleware { source, .. } => source.root_cause(),
            e => e,
        }
    }

    /// Chain of middleware names from the outermost to the failing one.
    pub fn middleware_chain(&self) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = self;
        while let PresetError::Middleware { middleware, source } = current {
            chain.push(middleware.as_str());
            current = source;
        }
        chain
    }

    /// Check whether the root cause is a configuration-shape error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.root_cause(), PresetError::Configuration { .. })
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let chain = self.middleware_chain();
        let root = self.root_cause();

        let mut diag = Diagnostic::error(root.to_string());
        if !chain.is_empty() {
            diag = diag.with_context(format!("while applying {}", chain.join(" -> ")));
        }

        match root {
            PresetError::Configuration { middleware, .. } => diag.with_suggestion(format!(
                "Check the options passed to `{}` in .rigging/config.toml",
                middleware
            )),
            PresetError::UnknownMiddleware(_) => diag.with_suggestion(suggestions::LIST_MIDDLEWARES),
            PresetError::UnknownCondition(_) => diag.with_suggestion(suggestions::KNOWN_CONDITIONS),
            PresetError::Io { path, .. } => diag.with_location(path.clone()),
            _ => diag,
        }
    }
}

/// Failure of a best-effort capability probe.
///
/// Never propagated out of a middleware: the probe site downgrades it to
/// "capability absent".
#[derive(Debug, Error)]
#[error("probe of `{}` failed: {message}", path.display())]
pub struct ProbeError {
    pub path: PathBuf,
    pub message: String,
}

impl ProbeError {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ProbeError {
            path: path.into(),
            message: message.into(),
        }
    }
}
