//! Subcommand and mode implementations.

pub mod config;
pub mod status;
