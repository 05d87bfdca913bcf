//! Log output for calstatus.
//!
//! Logs always go to stderr: stdout carries the status line that a status
//! bar reads. The CLI picks a preset ([`TracingConfig::cli_debug`],
//! [`TracingConfig::watch`] or the quiet default) and then applies the
//! `[log]` settings of its config file.
//!
//! ```ignore
//! use calstatus_core::tracing::{init_tracing, TracingConfig, TracingOutputFormat};
//!
//! init_tracing(TracingConfig::watch().with_format(TracingOutputFormat::Json))?;
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, Registry};

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TracingError {
    /// A global subscriber is already installed.
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// The filter directive does not parse.
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// How log lines are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingOutputFormat {
    /// One line per event
    #[default]
    Compact,
    /// Multi-line, human-oriented
    Pretty,
    /// One JSON object per line, for log collectors
    Json,
}

impl TracingOutputFormat {
    /// Returns the name used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for TracingOutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TracingOutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown log format '{}', expected compact, pretty or json",
                other
            )),
        }
    }
}

/// What to log and how.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level for calstatus crates when no filter is given
    pub default_level: Level,
    /// Line layout
    pub output_format: TracingOutputFormat,
    /// Include file and line of the log call
    pub include_location: bool,
    /// Include the module path
    pub include_target: bool,
    /// Include a timestamp
    pub include_timestamp: bool,
    /// Explicit filter directive; wins over `RUST_LOG` and `default_level`
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    /// Warnings only, no decoration: one-shot runs stay quiet.
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            output_format: TracingOutputFormat::default(),
            include_location: false,
            include_target: false,
            include_timestamp: false,
            env_filter: None,
        }
    }
}

impl TracingConfig {
    /// Everything from debug level up, with source locations.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_location: true,
            include_target: true,
            ..Self::default()
        }
    }

    /// Info level with timestamps, for the long-running watch loop.
    #[must_use]
    pub fn watch() -> Self {
        Self {
            default_level: Level::INFO,
            include_target: true,
            include_timestamp: true,
            ..Self::default()
        }
    }

    /// Set the line layout
    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set an explicit filter directive, e.g. `calstatus_providers=trace`
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Directive used when neither `env_filter` nor `RUST_LOG` is set.
    ///
    /// `calstatus` is a target prefix, so it covers every workspace crate.
    fn default_directive(&self) -> String {
        format!("calstatus={}", self.default_level)
    }

    fn build_filter(&self) -> Result<EnvFilter, TracingError> {
        match self.env_filter {
            Some(ref directive) => Ok(EnvFilter::try_new(directive)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))),
        }
    }
}

type FilteredRegistry = Layered<EnvFilter, Registry>;

/// Builds the stderr layer for the configured layout.
fn output_layer(config: &TracingConfig) -> Box<dyn Layer<FilteredRegistry> + Send + Sync> {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_target(config.include_target);

    match (config.output_format, config.include_timestamp) {
        (TracingOutputFormat::Compact, true) => layer.compact().boxed(),
        (TracingOutputFormat::Compact, false) => layer.compact().without_time().boxed(),
        (TracingOutputFormat::Pretty, true) => layer.pretty().boxed(),
        (TracingOutputFormat::Pretty, false) => layer.pretty().without_time().boxed(),
        // Collectors stamp JSON lines themselves only when asked to.
        (TracingOutputFormat::Json, _) => layer.json().boxed(),
    }
}

/// Installs the global log subscriber.
///
/// # Errors
///
/// Fails if a subscriber is already installed or `env_filter` is not a
/// valid directive.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let subscriber = tracing_subscriber::registry()
        .with(config.build_filter()?)
        .with(output_layer(&config));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod presets {
        use super::*;

        #[test]
        fn quiet_default() {
            let config = TracingConfig::default();
            assert_eq!(config.default_level, Level::WARN);
            assert_eq!(config.output_format, TracingOutputFormat::Compact);
            assert!(!config.include_location);
            assert!(!config.include_timestamp);
            assert!(config.env_filter.is_none());
        }

        #[test]
        fn cli_debug() {
            let config = TracingConfig::cli_debug();
            assert_eq!(config.default_level, Level::DEBUG);
            assert!(config.include_location);
            assert_eq!(config.default_directive(), "calstatus=DEBUG");
        }

        #[test]
        fn watch() {
            let config = TracingConfig::watch();
            assert_eq!(config.default_level, Level::INFO);
            assert!(config.include_timestamp);
            assert_eq!(config.output_format, TracingOutputFormat::Compact);
        }

        #[test]
        fn builders() {
            let config = TracingConfig::watch()
                .with_format(TracingOutputFormat::Json)
                .with_env_filter("calstatus_core=trace");

            assert_eq!(config.default_level, Level::INFO);
            assert_eq!(config.output_format, TracingOutputFormat::Json);
            assert_eq!(config.env_filter.as_deref(), Some("calstatus_core=trace"));
        }
    }

    mod format_names {
        use super::*;

        #[test]
        fn parse_and_display() {
            for format in [
                TracingOutputFormat::Compact,
                TracingOutputFormat::Pretty,
                TracingOutputFormat::Json,
            ] {
                assert_eq!(format.to_string().parse::<TracingOutputFormat>(), Ok(format));
            }
            assert_eq!("JSON".parse::<TracingOutputFormat>(), Ok(TracingOutputFormat::Json));
        }

        #[test]
        fn unknown_name() {
            let err = "xml".parse::<TracingOutputFormat>().unwrap_err();
            assert!(err.contains("compact, pretty or json"));
        }

        #[test]
        fn serde_lowercase() {
            let json = serde_json::to_string(&TracingOutputFormat::Pretty).unwrap();
            assert_eq!(json, r#""pretty""#);
            let parsed: TracingOutputFormat = serde_json::from_str(r#""json""#).unwrap();
            assert_eq!(parsed, TracingOutputFormat::Json);
        }
    }

    mod filters {
        use super::*;

        #[test]
        fn explicit_directive_is_validated() {
            let config = TracingConfig::default().with_env_filter("calstatus=loud");
            assert!(matches!(config.build_filter(), Err(TracingError::EnvFilter(_))));

            let config = TracingConfig::default().with_env_filter("calstatus_providers=trace");
            assert!(config.build_filter().is_ok());
        }

        #[test]
        fn layers_build_for_every_format() {
            for format in [
                TracingOutputFormat::Compact,
                TracingOutputFormat::Pretty,
                TracingOutputFormat::Json,
            ] {
                for timestamp in [true, false] {
                    let config = TracingConfig {
                        include_timestamp: timestamp,
                        ..TracingConfig::default().with_format(format)
                    };
                    let _layer = output_layer(&config);
                }
            }
        }
    }
}
