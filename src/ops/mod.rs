//! High-level operations.
//!
//! This module contains the implementation of the `rig` commands.

pub mod compose;

pub use compose::{build, compose, compose_in, ComposeOptions, Composition, DEFAULT_PRESET};
