//! CLI support for the `canopy` binary.

pub mod args;
pub mod commands;
pub mod context;

pub use context::CommandContext;
