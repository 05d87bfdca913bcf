//! Time and duration text.

use chrono::{DateTime, Duration, FixedOffset, Timelike};

use crate::error::{StatusError, StatusResult};

/// Formats the clock time of `instant` as `H:MM` (24-hour, no leading zero
/// on the hour), e.g. `9:05` or `14:30`.
pub fn format_clock_time(instant: DateTime<FixedOffset>) -> String {
    format!("{}:{:02}", instant.hour(), instant.minute())
}

/// Formats the distance between `instant` and `now`.
///
/// The distance is rounded up to whole minutes. Under an hour it reads
/// `M min`; from 60 minutes on it reads `HhM` (e.g. `1h0`, `2h15`).
///
/// The absolute distance is used, so the text is the same whether
/// `instant` is in the past or the future.
pub fn format_duration_until(instant: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> String {
    let delta = (instant - now).abs();
    let whole = delta.num_minutes();
    let minutes = if delta > Duration::minutes(whole) {
        whole + 1
    } else {
        whole
    };
    render_minutes(minutes.unsigned_abs())
}

/// Formats a minute count the same way as [`format_duration_until`].
///
/// This is the checked entry point for callers holding a raw minute count
/// (e.g. [`CalendarEvent::duration_minutes`](crate::CalendarEvent::duration_minutes)
/// or a number read from outside) rather than two instants. The renderer
/// works from instants and takes the absolute distance, so it never needs
/// the check.
///
/// ```
/// use calstatus_core::format_minutes;
///
/// assert_eq!(format_minutes(95).unwrap(), "1h35");
/// assert!(format_minutes(-5).is_err());
/// ```
///
/// # Errors
///
/// Returns [`StatusError::MalformedDuration`] for negative counts.
pub fn format_minutes(minutes: i64) -> StatusResult<String> {
    u64::try_from(minutes)
        .map(render_minutes)
        .map_err(|_| StatusError::MalformedDuration { minutes })
}

fn render_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;

    if hours > 0 {
        format!("{}h{}", hours, rest)
    } else {
        format!("{} min", rest)
    }
}
