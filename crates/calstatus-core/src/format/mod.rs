//! Status text rendering.
//!
//! This module turns a [`Selection`] into the short string shown in the
//! status bar:
//! - an upcoming event reads `"<title> dans <duration>"` and wins over the
//!   event the user is already in;
//! - a current event on its own reads as its title;
//! - an empty selection renders nothing (`None`), which hides the indicator.
//!
//! # Example
//!
//! ```rust
//! use calstatus_core::format::{render_status, StatusRenderer, StatusOptions};
//! use calstatus_core::{CalendarEvent, Selection};
//! use chrono::{FixedOffset, TimeZone};
//!
//! let tz = FixedOffset::east_opt(0).unwrap();
//! let now = tz.with_ymd_and_hms(2025, 2, 5, 10, 12, 0).unwrap();
//! let review = CalendarEvent::new(
//!     "Design review",
//!     tz.with_ymd_and_hms(2025, 2, 5, 10, 15, 0).unwrap(),
//!     tz.with_ymd_and_hms(2025, 2, 5, 11, 0, 0).unwrap(),
//! );
//! let selection = Selection { current: None, next: Some(&review) };
//!
//! assert_eq!(render_status(&selection, now).as_deref(), Some("Design review dans 3 min"));
//!
//! let renderer = StatusRenderer::new(StatusOptions::default().with_connector("in"));
//! assert_eq!(renderer.render(&selection, now).as_deref(), Some("Design review in 3 min"));
//! ```

mod duration;

use std::borrow::Cow;

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::event::{CalendarEvent, Selection};
use crate::select::DEFAULT_LOOK_AHEAD_MINUTES;

pub use duration::{format_clock_time, format_duration_until, format_minutes};

/// Longest title shown for an upcoming event before it is truncated.
pub const MAX_SUMMARY_LENGTH: usize = 35;

/// Marker appended to truncated titles.
pub const ELLIPSIS: &str = "...";

/// Word placed between an upcoming title and its countdown.
pub const DEFAULT_CONNECTOR: &str = "dans";

/// Configuration options for status rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusOptions {
    /// Maximum title length for upcoming events (truncated with ellipsis).
    pub max_summary_length: usize,
    /// How many minutes ahead an upcoming event is announced.
    pub look_ahead_minutes: u32,
    /// Word between an upcoming title and its countdown.
    pub connector: String,
}

impl Default for StatusOptions {
    fn default() -> Self {
        Self {
            max_summary_length: MAX_SUMMARY_LENGTH,
            look_ahead_minutes: DEFAULT_LOOK_AHEAD_MINUTES,
            connector: DEFAULT_CONNECTOR.to_string(),
        }
    }
}

impl StatusOptions {
    /// Returns the look-ahead horizon as a duration.
    pub fn look_ahead(&self) -> Duration {
        Duration::minutes(i64::from(self.look_ahead_minutes))
    }

    /// Set the maximum title length
    #[must_use]
    pub fn with_max_summary_length(mut self, max: usize) -> Self {
        self.max_summary_length = max;
        self
    }

    /// Set the look-ahead horizon in minutes
    #[must_use]
    pub fn with_look_ahead_minutes(mut self, minutes: u32) -> Self {
        self.look_ahead_minutes = minutes;
        self
    }

    /// Set the connector word
    #[must_use]
    pub fn with_connector(mut self, connector: impl Into<String>) -> Self {
        self.connector = connector.into();
        self
    }
}

/// Renderer for the indicator's status text.
#[derive(Debug, Clone, Default)]
pub struct StatusRenderer {
    options: StatusOptions,
}

impl StatusRenderer {
    /// Creates a new StatusRenderer with the given options.
    pub fn new(options: StatusOptions) -> Self {
        Self { options }
    }

    /// Creates a new StatusRenderer with default options.
    pub fn with_defaults() -> Self {
        Self::new(StatusOptions::default())
    }

    /// Returns the options this renderer was built with.
    pub fn options(&self) -> &StatusOptions {
        &self.options
    }

    /// Renders the status text for a selection.
    ///
    /// Returns `None` when there is nothing to show.
    pub fn render(&self, selection: &Selection<'_>, now: DateTime<FixedOffset>) -> Option<String> {
        match (selection.current, selection.next) {
            (Some(_), Some(next)) => Some(self.format_upcoming(next, now)),
            (Some(current), None) => Some(current.summary.clone()),
            (None, Some(next)) => Some(self.format_upcoming(next, now)),
            (None, None) => None,
        }
    }

    /// Formats an upcoming event as `"<title> <connector> <duration>"`.
    fn format_upcoming(&self, event: &CalendarEvent, now: DateTime<FixedOffset>) -> String {
        let summary = truncate_summary(&event.summary, self.options.max_summary_length);
        let countdown = format_duration_until(event.start, now);
        format!("{} {} {}", summary, self.options.connector, countdown)
    }
}

/// Renders the status text with default options.
///
/// See [`StatusRenderer::render`].
pub fn render_status(selection: &Selection<'_>, now: DateTime<FixedOffset>) -> Option<String> {
    StatusRenderer::with_defaults().render(selection, now)
}

/// Truncates a title to `max_length` characters, appending [`ELLIPSIS`].
///
/// Counts Unicode scalar values, not display width.
pub fn truncate_summary(summary: &str, max_length: usize) -> Cow<'_, str> {
    if summary.chars().count() <= max_length {
        return Cow::Borrowed(summary);
    }

    let truncated: String = summary.chars().take(max_length).collect();
    Cow::Owned(format!("{}{}", truncated, ELLIPSIS))
}
