//! Core data structures.
//!
//! This module contains the foundational types every middleware works with:
//! - The configuration tree (rules, plugins, output, entry points)
//! - The environment snapshot and its named conditions
//! - Project layout options
//! - Composition errors

pub mod configuration;
pub mod environment;
pub mod errors;
pub mod plugin;
pub mod project;
pub mod rule;

pub use configuration::{Configuration, Devtool, External};
pub use environment::{Command, Condition, Environment, Mode};
pub use errors::{PresetError, ProbeError};
pub use plugin::{Chunk, ChunkNamer, PluginArg, PluginRegistry};
pub use project::ProjectOptions;
pub use rule::{ModuleRules, Rule, UseEntry};
