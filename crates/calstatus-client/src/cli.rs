//! Command-line interface definition.

use std::path::PathBuf;

use calstatus_core::TracingOutputFormat;
use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};

/// calstatus - Your current and next calendar event, for status bars
#[derive(Debug, Parser)]
#[command(name = "calstatus")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CALSTATUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log line layout on stderr: compact, pretty or json
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<TracingOutputFormat>,

    /// Calendar file to read (.ics or .json)
    #[arg(long, env = "CALSTATUS_CALENDAR")]
    pub calendar: Option<PathBuf>,

    /// Output the indicator state as JSON
    #[arg(long)]
    pub json: bool,

    /// Keep running and print the status whenever it changes
    #[arg(long, short)]
    pub watch: bool,

    /// Seconds between refreshes in watch mode
    #[arg(long)]
    pub interval: Option<u64>,

    /// Minutes ahead an upcoming event is announced
    #[arg(long)]
    pub look_ahead: Option<u32>,

    /// Maximum title length for upcoming events (truncated with ellipsis)
    #[arg(long)]
    pub max_title_length: Option<usize>,

    /// Use this instant instead of the current time (RFC 3339)
    #[arg(long, value_parser = parse_now)]
    pub now: Option<DateTime<FixedOffset>>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}

/// Parses an RFC 3339 timestamp such as `2025-02-05T10:12:00+01:00`.
pub fn parse_now(value: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| format!("invalid RFC 3339 timestamp '{}': {}", value, e))
}
