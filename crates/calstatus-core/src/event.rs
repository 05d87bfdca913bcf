//! Event types for the status indicator.
//!
//! This module provides the two values that flow through the pipeline:
//! - [`CalendarEvent`]: a read-only snapshot of one calendar entry
//! - [`Selection`]: the current/next pair picked for display

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

/// A calendar event as seen by the indicator.
///
/// Only the title and the time span are consulted. Times carry the offset
/// they were observed in (normally the local one), and all "midnight" and
/// clock-time checks are made in that offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The display title. May contain arbitrary Unicode, including emoji.
    pub summary: String,
    /// When the event starts.
    pub start: DateTime<FixedOffset>,
    /// When the event ends. Expected to be at or after `start`.
    pub end: DateTime<FixedOffset>,
}

impl CalendarEvent {
    /// Creates a new event.
    pub fn new(
        summary: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            summary: summary.into(),
            start,
            end,
        }
    }

    /// Returns true when `end` is not before `start`.
    pub fn has_valid_span(&self) -> bool {
        self.start <= self.end
    }

    /// Returns true if both ends of the event sit exactly on a midnight.
    ///
    /// This is how calendar sources hand over all-day entries.
    pub fn is_all_day_marker(&self) -> bool {
        is_midnight(&self.start) && is_midnight(&self.end)
    }

    /// Checks if the event is ongoing at the given time.
    ///
    /// Uses half-open interval semantics: `[start, end)`.
    pub fn is_ongoing_at(&self, now: DateTime<FixedOffset>) -> bool {
        self.start <= now && now < self.end
    }

    /// Returns the duration of the event in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

fn is_midnight(dt: &DateTime<FixedOffset>) -> bool {
    dt.hour() == 0 && dt.minute() == 0
}

/// The events chosen for display at a given instant.
///
/// `current`, when present, contains the instant it was selected for.
/// `next`, when present, starts within the look-ahead horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection<'a> {
    /// The event the user is currently in.
    pub current: Option<&'a CalendarEvent>,
    /// The next event worth announcing.
    pub next: Option<&'a CalendarEvent>,
}

impl<'a> Selection<'a> {
    /// A selection with nothing in it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if neither a current nor a next event was selected.
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.next.is_none()
    }

    /// Iterates over the selected events, current first.
    pub fn events(&self) -> impl Iterator<Item = &'a CalendarEvent> {
        self.current.into_iter().chain(self.next)
    }
}
