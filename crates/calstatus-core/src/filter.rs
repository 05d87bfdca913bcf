//! Reduction of a day's raw events to the ones worth tracking.

use tracing::trace;

use crate::error::{StatusError, StatusResult};
use crate::event::CalendarEvent;

/// Drops all-day entries from a day's event list.
///
/// The input is expected to be the events of a single day, as returned by a
/// calendar source for the window between two local midnights. An event
/// whose start and end both fall exactly on a midnight is how sources encode
/// an all-day entry; it has no actionable time of day and is removed. All
/// other events pass through in their original order.
///
/// # Errors
///
/// Returns [`StatusError::InvalidEventSpan`] for the first event that ends
/// before it starts.
pub fn filter_displayable_events(events: &[CalendarEvent]) -> StatusResult<Vec<CalendarEvent>> {
    let mut kept = Vec::with_capacity(events.len());

    for event in events {
        if !event.has_valid_span() {
            return Err(StatusError::InvalidEventSpan {
                summary: event.summary.clone(),
                start: event.start,
                end: event.end,
            });
        }

        if event.is_all_day_marker() {
            trace!(summary = %event.summary, "Skipping all-day event");
            continue;
        }

        kept.push(event.clone());
    }

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn at(d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2025, 2, d, h, min, 0)
            .unwrap()
    }

    fn event(summary: &str, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> CalendarEvent {
        CalendarEvent::new(summary, start, end)
    }

    #[test]
    fn empty_input() {
        assert_eq!(filter_displayable_events(&[]).unwrap(), vec![]);
    }

    #[test]
    fn removes_all_day_events() {
        let events = vec![
            event("Holiday", at(5, 0, 0), at(6, 0, 0)),
            event("Standup", at(5, 9, 0), at(5, 9, 15)),
        ];

        let kept = filter_displayable_events(&events).unwrap();
        assert_eq!(kept, vec![events[1].clone()]);
    }

    #[test]
    fn removes_zero_length_midnight_events() {
        let events = vec![event("Reminder", at(5, 0, 0), at(5, 0, 0))];
        assert!(filter_displayable_events(&events).unwrap().is_empty());
    }

    #[test]
    fn keeps_events_touching_one_midnight() {
        let events = vec![
            event("Early start", at(5, 0, 0), at(5, 1, 30)),
            event("Late finish", at(5, 22, 0), at(6, 0, 0)),
        ];

        assert_eq!(filter_displayable_events(&events).unwrap(), events);
    }

    #[test]
    fn midnight_with_seconds_is_still_midnight() {
        // Only hours and minutes are compared.
        let start = at(5, 0, 0) + chrono::Duration::seconds(30);
        let events = vec![event("Almost all day", start, at(6, 0, 0))];
        assert!(filter_displayable_events(&events).unwrap().is_empty());
    }

    #[test]
    fn preserves_order() {
        let events = vec![
            event("A", at(5, 9, 0), at(5, 10, 0)),
            event("Holiday", at(5, 0, 0), at(6, 0, 0)),
            event("B", at(5, 9, 0), at(5, 9, 30)),
            event("C", at(5, 14, 0), at(5, 15, 0)),
        ];

        let titles: Vec<_> = filter_displayable_events(&events)
            .unwrap()
            .into_iter()
            .map(|e| e.summary)
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn rejects_inverted_span() {
        let events = vec![
            event("Fine", at(5, 9, 0), at(5, 10, 0)),
            event("Broken", at(5, 11, 0), at(5, 10, 0)),
        ];

        let err = filter_displayable_events(&events).unwrap_err();
        assert!(matches!(
            err,
            StatusError::InvalidEventSpan { ref summary, .. } if summary == "Broken"
        ));
    }

    #[test]
    fn idempotent() {
        let events = vec![
            event("Holiday", at(5, 0, 0), at(6, 0, 0)),
            event("Standup", at(5, 9, 0), at(5, 9, 15)),
            event("Marker", at(5, 0, 0), at(5, 0, 0)),
            event("Review", at(5, 16, 0), at(5, 17, 0)),
        ];

        let once = filter_displayable_events(&events).unwrap();
        let twice = filter_displayable_events(&once).unwrap();
        assert_eq!(once, twice);
    }
}
