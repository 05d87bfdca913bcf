//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/calstatus/config.toml` by default:
//!
//! ```toml
//! debug = false
//!
//! [status]
//! max_summary_length = 35
//! look_ahead_minutes = 5
//! connector = "dans"
//!
//! [source]
//! path = "/home/me/calendars/work.ics"
//!
//! [refresh]
//! interval_secs = 5
//!
//! [log]
//! format = "compact"             # compact, pretty or json
//! filter = "calstatus=debug"     # optional, overrides RUST_LOG
//! ```
//!
//! Command-line flags override the file, see [`ClientConfig::with_cli_overrides`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use calstatus_core::{StatusOptions, TracingConfig, TracingOutputFormat};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Configuration for the calstatus client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Status text settings.
    pub status: StatusOptions,

    /// Calendar source settings.
    pub source: SourceSettings,

    /// Refresh loop settings.
    pub refresh: RefreshSettings,

    /// Log output settings.
    pub log: LogSettings,
}

/// Where events are read from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Calendar file; the extension selects the format (`.ics` or `.json`).
    pub path: Option<PathBuf>,
}

/// Watch-mode refresh settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshSettings {
    /// Seconds between refreshes.
    pub interval_secs: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

/// How logs are written to stderr.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Line layout.
    pub format: TracingOutputFormat,

    /// Filter directive in `RUST_LOG` syntax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl RefreshSettings {
    /// Returns the refresh interval, never shorter than one second.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calstatus")
    }

    /// Applies command-line flags on top of the file settings.
    #[must_use]
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(ref path) = cli.calendar {
            self.source.path = Some(path.clone());
        }
        if let Some(interval) = cli.interval {
            self.refresh.interval_secs = interval;
        }
        if let Some(minutes) = cli.look_ahead {
            self.status.look_ahead_minutes = minutes;
        }
        if let Some(max) = cli.max_title_length {
            self.status.max_summary_length = max;
        }
        if let Some(format) = cli.log_format {
            self.log.format = format;
        }
        self.debug |= cli.debug;
        self
    }

    /// Picks the log preset for this run and applies the `[log]` settings.
    ///
    /// Debug mode wins over watch mode; one-shot runs only log warnings.
    pub fn tracing_config(&self, watch: bool) -> TracingConfig {
        let preset = if self.debug {
            TracingConfig::cli_debug()
        } else if watch {
            TracingConfig::watch()
        } else {
            TracingConfig::default()
        };

        let config = preset.with_format(self.log.format);
        match self.log.filter {
            Some(ref filter) => config.with_env_filter(filter.as_str()),
            None => config,
        }
    }
}
