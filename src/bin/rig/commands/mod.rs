//! Command implementations

pub mod completions;
pub mod compose;
pub mod list;
