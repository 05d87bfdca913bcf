//! One refresh of the indicator.
//!
//! A refresh asks the calendar source for the local day containing `now`,
//! then hands the events to the core [`Indicator`]. This mirrors what a
//! status-bar widget does on every timer tick.

use calstatus_core::{Indicator, IndicatorState, StatusOptions, TimeWindow};
use calstatus_providers::{CalendarSource, fetch_day_events, open_file_source};
use chrono::{DateTime, FixedOffset, Local};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Returns the current local time.
pub fn current_time() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Couples a calendar source with the indicator pipeline.
pub struct StatusRunner {
    source: Box<dyn CalendarSource>,
    indicator: Indicator,
}

impl StatusRunner {
    /// Creates a runner for the given source and options.
    pub fn new(source: Box<dyn CalendarSource>, options: StatusOptions) -> Self {
        Self {
            source,
            indicator: Indicator::new(options),
        }
    }

    /// Creates a runner from the configured calendar file.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let path = config.source.path.as_deref().ok_or_else(|| {
            ClientError::Config(format!(
                "no calendar configured. Pass --calendar <PATH> or add to {}:\n  \
                 [source]\n  \
                 path = \"/path/to/calendar.ics\"",
                ClientConfig::default_path().display()
            ))
        })?;

        let source = open_file_source(path)?;
        debug!(source = source.name(), path = %path.display(), "Opened calendar source");
        Ok(Self::new(source, config.status.clone()))
    }

    /// Returns the source's name.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Computes the indicator state at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or hands back malformed events.
    pub async fn refresh(&self, now: DateTime<FixedOffset>) -> ClientResult<IndicatorState> {
        let window = TimeWindow::day_of(&now)
            .ok_or_else(|| ClientError::Config(format!("no calendar day contains {}", now)))?;
        let events = fetch_day_events(self.source.as_ref(), window).await?;
        let state = self.indicator.compute_state(&events, now)?;
        debug!(visible = state.visible, text = %state.text, "Refreshed status");
        Ok(state)
    }

    /// Like [`StatusRunner::refresh`], but a failure hides the indicator.
    pub async fn refresh_or_hidden(&self, now: DateTime<FixedOffset>) -> IndicatorState {
        match self.refresh(now).await {
            Ok(state) => state,
            Err(e) => {
                warn!(source = self.source_name(), error = %e, "Refresh failed, hiding indicator");
                IndicatorState::hidden()
            }
        }
    }
}

/// Renders a state as one output line.
///
/// Plain output is the status text, empty when hidden. JSON output is the
/// whole [`IndicatorState`].
pub fn render_line(state: &IndicatorState, json: bool) -> ClientResult<String> {
    if json {
        serde_json::to_string(state)
            .map_err(|e| ClientError::Output(format!("failed to serialize state: {}", e)))
    } else {
        Ok(state.text.clone())
    }
}
