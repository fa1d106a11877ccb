//! Rigging - composable bundler configuration presets.
//!
//! This crate provides the core library functionality for Rigging: an ordered
//! middleware pipeline that builds a bundler configuration from named presets,
//! the project layout and the process environment.

pub mod core;
pub mod middleware;
pub mod ops;
pub mod presets;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// This module is only available when compiling tests. It provides an
/// in-memory filesystem for the directory listing and manifest probes.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{Configuration, Environment, PresetError, ProjectOptions};
pub use middleware::{Api, Middleware, MiddlewareRegistry};
pub use util::context::GlobalContext;
