//! Selection of the current and next event.
//!
//! Given a day's displayable events ordered by start time, the selector
//! finds the event the clock is inside and the next one worth announcing.
//! Events sharing a start with the current one are treated as the same slot
//! and never reported as "next".

use chrono::{DateTime, Duration, FixedOffset};
use tracing::{debug, trace};

use crate::error::{StatusError, StatusResult};
use crate::event::{CalendarEvent, Selection};

/// How far ahead an upcoming event is announced, in minutes.
pub const DEFAULT_LOOK_AHEAD_MINUTES: u32 = 5;

/// Selects the current and next event with the default 5 minute look-ahead.
///
/// See [`select_current_and_next_within`].
pub fn select_current_and_next(
    events: &[CalendarEvent],
    now: DateTime<FixedOffset>,
) -> StatusResult<Selection<'_>> {
    let look_ahead = Duration::minutes(i64::from(DEFAULT_LOOK_AHEAD_MINUTES));
    select_current_and_next_within(events, now, look_ahead)
}

/// Selects the current and next event for `now`.
///
/// Scans `events` once, in order:
/// - the first event that has not started yet becomes `next`, with no
///   current event;
/// - otherwise the first event containing `now` becomes `current`, and the
///   first later event with a different start becomes `next`.
///
/// A `next` event starting after `now + look_ahead` is dropped, whether or
/// not a current event was found.
///
/// # Errors
///
/// Returns [`StatusError::InvalidEventOrdering`] if `events` is not sorted
/// by start time.
pub fn select_current_and_next_within(
    events: &[CalendarEvent],
    now: DateTime<FixedOffset>,
    look_ahead: Duration,
) -> StatusResult<Selection<'_>> {
    check_ordering(events)?;

    let found = scan(events, now);
    let horizon = now + look_ahead;
    let next = found.next.filter(|event| event.start <= horizon);

    if let (Some(dropped), None) = (found.next, next) {
        trace!(summary = %dropped.summary, start = %dropped.start, "Next event is beyond look-ahead");
    }

    let selection = Selection {
        current: found.current,
        next,
    };

    debug!(
        current = ?selection.current.map(|e| e.summary.as_str()),
        next = ?selection.next.map(|e| e.summary.as_str()),
        "Selected events"
    );

    Ok(selection)
}

fn check_ordering(events: &[CalendarEvent]) -> StatusResult<()> {
    match events
        .windows(2)
        .position(|pair| pair[1].start < pair[0].start)
    {
        Some(i) => {
            let previous = &events[i];
            let event = &events[i + 1];
            Err(StatusError::InvalidEventOrdering {
                index: i + 1,
                summary: event.summary.clone(),
                start: event.start,
                previous_start: previous.start,
            })
        }
        None => Ok(()),
    }
}

/// Finds the current/next candidates before the look-ahead gate.
fn scan(events: &[CalendarEvent], now: DateTime<FixedOffset>) -> Selection<'_> {
    for (i, event) in events.iter().enumerate() {
        if now < event.start {
            return Selection {
                current: None,
                next: Some(event),
            };
        }

        if now < event.end {
            let next = events[i + 1..]
                .iter()
                .find(|candidate| candidate.start != event.start);
            return Selection {
                current: Some(event),
                next,
            };
        }
    }

    Selection::empty()
}
