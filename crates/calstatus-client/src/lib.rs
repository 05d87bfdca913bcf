//! CLI, configuration and refresh loop
//!
//! This crate provides the `calstatus` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod status;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
pub use status::StatusRunner;
