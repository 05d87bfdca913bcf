//! Query windows for calendar sources.
//!
//! [`TimeWindow`] is the half-open range a calendar source is asked for.
//! The indicator always asks for one local day: from local midnight to the
//! next local midnight.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::event::CalendarEvent;

/// A time window for querying calendar events.
///
/// Represents a half-open interval `[start, end)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(start <= end, "TimeWindow start must be <= end");
        Self { start, end }
    }

    /// Creates a time window for a single day in the given timezone.
    ///
    /// Returns `None` only for dates at the very end of chrono's range.
    pub fn for_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<Self> {
        let start = local_midnight(date, tz)?;
        let end = local_midnight(date.succ_opt()?, tz)?;
        Some(Self { start, end })
    }

    /// Creates a time window for the local day containing `now`.
    pub fn day_of<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<Self> {
        Self::for_day(now.date_naive(), &now.timezone())
    }

    /// Returns the duration of this time window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if a datetime falls within this window.
    ///
    /// Uses half-open interval semantics: `[start, end)`.
    pub fn contains<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> bool {
        self.start <= *dt && *dt < self.end
    }

    /// Checks if an event overlaps this window.
    ///
    /// An event overlaps if it starts before the window ends and ends after
    /// the window starts. A zero-length event overlaps if its instant lies
    /// within the window.
    pub fn overlaps_event(&self, event: &CalendarEvent) -> bool {
        if event.start == event.end {
            return self.contains(&event.start);
        }
        event.start < self.end && event.end > self.start
    }
}

/// Resolves local midnight of `date`, skipping forward over a DST gap.
fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
}
