//! iCalendar files.
//!
//! This module parses iCalendar (RFC 5545) data into [`CalendarEvent`]s,
//! expressed in the zone the indicator displays times in:
//!
//! - `DATE` values become midnight in the display zone, so an all-day entry
//!   spans midnight to midnight and is filtered out by the core
//! - UTC and `TZID` times are converted to the display zone
//! - floating times are read as display-zone wall-clock times
//!
//! Events with an `RRULE` are expanded into their occurrences around the
//! requested window. `EXDATE`s drop occurrences, and so does a separate
//! `VEVENT` sharing the UID with a `RECURRENCE-ID`: that one is an edited
//! occurrence and is read as an event of its own.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use calstatus_core::{CalendarEvent, TimeWindow};
use chrono::{
    DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, Event, Property,
};
use rrule::RRuleSet;
use tracing::{debug, warn};

use crate::error::{SourceError, SourceResult};
use crate::source::{BoxFuture, CalendarSource, events_in_window};

const SOURCE_NAME: &str = "ics";

/// Title used for events without a `SUMMARY`.
pub const UNTITLED: &str = "(No title)";

/// Upper bound on occurrences generated per recurring event and fetch.
const MAX_OCCURRENCES: u16 = 366;

const ICS_STAMP: &str = "%Y%m%dT%H%M%S";

/// Parses ICS content into the events overlapping `window`, displayed in
/// `tz` and sorted by start.
///
/// Components other than `VEVENT` are ignored, as are events without a
/// `DTSTART`.
///
/// # Errors
///
/// Returns a parse error when the content is not valid iCalendar data.
pub fn parse_ics_content<Tz: TimeZone>(
    ics: &str,
    tz: &Tz,
    window: &TimeWindow,
) -> SourceResult<Vec<CalendarEvent>> {
    let calendar = ics.parse::<Calendar>().map_err(|e| {
        SourceError::parse(format!("invalid iCalendar data: {}", e)).with_source_name(SOURCE_NAME)
    })?;

    let vevents: Vec<&Event> = calendar
        .iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => Some(event),
            _ => None,
        })
        .collect();

    let mut edited: HashMap<&str, Vec<DatePerhapsTime>> = HashMap::new();
    for event in &vevents {
        if let (Some(uid), Some(id)) = (event.get_uid(), event.get_recurrence_id()) {
            edited.entry(uid).or_default().push(id);
        }
    }

    let events = vevents.into_iter().flat_map(|event| {
        let edited = event
            .get_uid()
            .and_then(|uid| edited.get(uid))
            .map(Vec::as_slice)
            .unwrap_or_default();
        parse_event(event, tz, window, edited)
    });

    Ok(events_in_window(events, window))
}

/// Parses a single VEVENT component into its occurrences.
fn parse_event<Tz: TimeZone>(
    event: &Event,
    tz: &Tz,
    window: &TimeWindow,
    edited: &[DatePerhapsTime],
) -> Vec<CalendarEvent> {
    let Some(first) = first_occurrence(event, tz) else {
        return Vec::new();
    };
    match event.property_value("RRULE") {
        Some(rule) => expand_recurrence(event, rule, first, tz, window, edited),
        None => vec![first],
    }
}

/// Reads the event as written, ignoring any recurrence.
fn first_occurrence<Tz: TimeZone>(event: &Event, tz: &Tz) -> Option<CalendarEvent> {
    let Some(start_value) = event.get_start() else {
        debug!(uid = ?event.get_uid(), "Skipping event without DTSTART");
        return None;
    };
    let start_date = match &start_value {
        DatePerhapsTime::Date(date) => Some(*date),
        DatePerhapsTime::DateTime(_) => None,
    };

    let start = resolve(start_value, tz)?;
    let end = match (event.get_end(), start_date) {
        (Some(end_value), _) => resolve(end_value, tz)?,
        // A lone DATE start lasts the whole day
        (None, Some(date)) => local_datetime(date.succ_opt()?.and_time(NaiveTime::MIN), tz)?,
        (None, None) => start,
    };

    let summary = event
        .get_summary()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNTITLED);

    debug!(
        uid = ?event.get_uid(),
        summary = %summary,
        start = %start,
        "Parsed event from ICS"
    );

    Some(CalendarEvent::new(summary, start, end))
}

/// Expands `rule` into the occurrences that may overlap `window`.
///
/// A rule the expander rejects leaves the first occurrence alone.
fn expand_recurrence<Tz: TimeZone>(
    event: &Event,
    rule: &str,
    first: CalendarEvent,
    tz: &Tz,
    window: &TimeWindow,
    edited: &[DatePerhapsTime],
) -> Vec<CalendarEvent> {
    let Some(anchor) = event.get_start().as_ref().map(Anchor::new) else {
        return vec![first];
    };

    let mut lines = vec![format!("DTSTART{}", anchor.rrule_value()), format!("RRULE:{}", rule)];
    lines.extend(
        exdates(event)
            .chain(edited.iter().cloned())
            .map(|value| format!("EXDATE{}", anchor.exclusion(&value).rrule_value())),
    );

    let rules = match lines.join("\n").parse::<RRuleSet>() {
        Ok(rules) => rules,
        Err(e) => {
            warn!(uid = ?event.get_uid(), rule, error = %e, "Invalid recurrence, keeping first occurrence");
            return vec![first];
        }
    };

    // A day of slack on both sides covers any display-zone offset.
    let utc: rrule::Tz = Utc.into();
    let after = (window.start - (first.end - first.start) - Duration::days(1)).with_timezone(&utc);
    let before = (window.end + Duration::days(1)).with_timezone(&utc);
    let result = rules.after(after).before(before).all(MAX_OCCURRENCES);
    if result.limited {
        debug!(uid = ?event.get_uid(), limit = MAX_OCCURRENCES, "Recurrence expansion truncated");
    }

    let occurrences: Vec<CalendarEvent> = result
        .dates
        .iter()
        .filter_map(|occurrence| {
            let (start, end) = anchor.occurrence(occurrence, &first, tz)?;
            Some(CalendarEvent::new(first.summary.clone(), start, end))
        })
        .collect();
    debug!(uid = ?event.get_uid(), count = occurrences.len(), "Expanded recurring event");
    occurrences
}

/// Every `EXDATE` value, comma-separated lists included.
fn exdates(event: &Event) -> impl Iterator<Item = DatePerhapsTime> + '_ {
    event
        .multi_properties()
        .get("EXDATE")
        .into_iter()
        .flatten()
        .flat_map(|property| {
            property.value().split(',').filter_map(move |value| {
                let mut single = Property::new("EXDATE", value.trim());
                for parameter in property.params().values() {
                    single.append_parameter(parameter.clone());
                }
                DatePerhapsTime::from_property(&single)
            })
        })
}

/// The start of a recurring event, in the terms the expander understands.
///
/// The expander has no floating times, so wall-clock times travel as UTC
/// and are read back as display-zone wall-clock times.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    Utc(DateTime<Utc>),
    Zoned(NaiveDateTime, chrono_tz::Tz),
    WallClock(NaiveDateTime),
}

impl Anchor {
    fn new(value: &DatePerhapsTime) -> Self {
        match value {
            DatePerhapsTime::Date(date) => Self::WallClock(date.and_time(NaiveTime::MIN)),
            DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => Self::Utc(*dt),
            DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => Self::WallClock(*naive),
            DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
                match tzid.parse::<chrono_tz::Tz>() {
                    Ok(zone) => Self::Zoned(*date_time, zone),
                    Err(_) => Self::WallClock(*date_time),
                }
            }
        }
    }

    /// The same time of day on another date.
    fn on(self, date: NaiveDate) -> Self {
        match self {
            Self::Utc(dt) => Self::Utc(date.and_time(dt.time()).and_utc()),
            Self::Zoned(naive, zone) => Self::Zoned(date.and_time(naive.time()), zone),
            Self::WallClock(naive) => Self::WallClock(date.and_time(naive.time())),
        }
    }

    /// Reads an excluded start relative to this one.
    ///
    /// A bare date drops the occurrence of that day, and a floating time
    /// shares this start's zone.
    fn exclusion(self, value: &DatePerhapsTime) -> Self {
        match (value, self) {
            (DatePerhapsTime::Date(date), _) => self.on(*date),
            (DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)), Self::Zoned(_, zone)) => {
                Self::Zoned(*naive, zone)
            }
            _ => Self::new(value),
        }
    }

    /// Parameters and value of a `DTSTART` or `EXDATE` line.
    fn rrule_value(self) -> String {
        match self {
            Self::Utc(dt) => format!(":{}Z", dt.format(ICS_STAMP)),
            Self::Zoned(naive, zone) => format!(";TZID={}:{}", zone.name(), naive.format(ICS_STAMP)),
            Self::WallClock(naive) => format!(":{}Z", naive.format(ICS_STAMP)),
        }
    }

    /// Start and end of an occurrence in the display zone.
    fn occurrence<Tz: TimeZone>(
        self,
        occurrence: &DateTime<rrule::Tz>,
        first: &CalendarEvent,
        tz: &Tz,
    ) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        match self {
            Self::WallClock(_) => {
                let wall_start = occurrence.naive_utc();
                let wall_span = first.end.naive_local() - first.start.naive_local();
                Some((
                    local_datetime(wall_start, tz)?,
                    local_datetime(wall_start + wall_span, tz)?,
                ))
            }
            Self::Utc(_) | Self::Zoned(..) => {
                let start = occurrence.with_timezone(tz).fixed_offset();
                Some((start, start + (first.end - first.start)))
            }
        }
    }
}

/// Converts an iCalendar date or datetime to the display zone.
fn resolve<Tz: TimeZone>(value: DatePerhapsTime, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    match value {
        DatePerhapsTime::Date(date) => local_datetime(date.and_time(NaiveTime::MIN), tz),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => {
            Some(dt.with_timezone(tz).fixed_offset())
        }
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => local_datetime(naive, tz),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            match tzid.parse::<chrono_tz::Tz>() {
                Ok(zone) => local_datetime(date_time, &zone)
                    .map(|dt| dt.with_timezone(tz).fixed_offset()),
                Err(_) => {
                    warn!(tzid = %tzid, "Unknown TZID, reading time as local");
                    local_datetime(date_time, tz)
                }
            }
        }
    }
}

/// Resolves a wall-clock time in `tz`, skipping forward over a DST gap.
fn local_datetime<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.fixed_offset())
}

/// A source reading events from an iCalendar file at every fetch.
///
/// Times are displayed in the system's local zone.
#[derive(Debug, Clone)]
pub struct IcsFileSource {
    path: PathBuf,
}

impl IcsFileSource {
    /// Creates a source for the given file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CalendarSource for IcsFileSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn fetch_events(&self, window: TimeWindow) -> BoxFuture<'_, SourceResult<Vec<CalendarEvent>>> {
        Box::pin(async move {
            let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
                SourceError::io(format!("failed to read {}", self.path.display()))
                    .with_source_name(SOURCE_NAME)
                    .with_cause(e)
            })?;

            let events = parse_ics_content(&content, &Local, &window)?;
            debug!(path = %self.path.display(), count = events.len(), "Loaded iCalendar file");
            Ok(events)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceErrorCode;
    use chrono::Datelike;
    use std::io::Write;

    fn plus_one() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }

    /// All of 2025, for reading single events.
    fn year() -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    fn day_of(y: i32, m: u32, d: u32, tz: &impl TimeZone) -> TimeWindow {
        TimeWindow::for_day(NaiveDate::from_ymd_opt(y, m, d).unwrap(), tz).unwrap()
    }

    fn wrap(events: &str) -> String {
        format!(
            "BEGIN:VCALENDAR\r\n\
             VERSION:2.0\r\n\
             PRODID:-//Test//Test//EN\r\n\
             {}\
             END:VCALENDAR\r\n",
            events
        )
    }

    fn sample_ics() -> String {
        wrap(
            "BEGIN:VEVENT\r\n\
             UID:standup@example.com\r\n\
             DTSTART:20250205T080000Z\r\n\
             DTEND:20250205T081500Z\r\n\
             SUMMARY:Standup\r\n\
             END:VEVENT\r\n",
        )
    }

    #[test]
    fn parse_utc_event_into_display_zone() {
        let events = parse_ics_content(&sample_ics(), &plus_one(), &year()).unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.summary, "Standup");
        assert_eq!(event.start.to_rfc3339(), "2025-02-05T09:00:00+01:00");
        assert_eq!(event.end.to_rfc3339(), "2025-02-05T09:15:00+01:00");
    }

    #[test]
    fn parse_all_day_event() {
        let ics = wrap(
            "BEGIN:VEVENT\r\n\
             UID:holiday@example.com\r\n\
             DTSTART;VALUE=DATE:20250210\r\n\
             DTEND;VALUE=DATE:20250211\r\n\
             SUMMARY:Company Holiday\r\n\
             END:VEVENT\r\n",
        );
        let events = parse_ics_content(&ics, &plus_one(), &year()).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start.to_rfc3339(), "2025-02-10T00:00:00+01:00");
        assert_eq!(events[0].end.to_rfc3339(), "2025-02-11T00:00:00+01:00");
        assert!(events[0].is_all_day_marker());
    }

    #[test]
    fn date_without_end_lasts_one_day() {
        let ics = wrap(
            "BEGIN:VEVENT\r\n\
             UID:birthday@example.com\r\n\
             DTSTART;VALUE=DATE:20250210\r\n\
             SUMMARY:Birthday\r\n\
             END:VEVENT\r\n",
        );
        let events = parse_ics_content(&ics, &Utc, &year()).unwrap();

        assert_eq!(events[0].end - events[0].start, Duration::days(1));
        assert!(events[0].is_all_day_marker());
    }

    #[test]
    fn datetime_without_end_is_instant() {
        let ics = wrap(
            "BEGIN:VEVENT\r\n\
             UID:reminder@example.com\r\n\
             DTSTART:20250205T100000Z\r\n\
             SUMMARY:Reminder\r\n\
             END:VEVENT\r\n",
        );
        let events = parse_ics_content(&ics, &Utc, &year()).unwrap();

        assert_eq!(events[0].start, events[0].end);
    }

    #[test]
    fn floating_time_uses_display_zone() {
        let ics = wrap(
            "BEGIN:VEVENT\r\n\
             UID:floating@example.com\r\n\
             DTSTART:20250205T100000\r\n\
             DTEND:20250205T110000\r\n\
             SUMMARY:Floating\r\n\
             END:VEVENT\r\n",
        );
        let events = parse_ics_content(&ics, &plus_one(), &year()).unwrap();

        assert_eq!(events[0].start.to_rfc3339(), "2025-02-05T10:00:00+01:00");
    }

    #[test]
    fn tzid_is_converted() {
        let ics = wrap(
            "BEGIN:VEVENT\r\n\
             UID:nyc@example.com\r\n\
             DTSTART;TZID=America/New_York:20250205T090000\r\n\
             DTEND;TZID=America/New_York:20250205T100000\r\n\
             SUMMARY:NYC sync\r\n\
             END:VEVENT\r\n",
        );
        let events = parse_ics_content(&ics, &plus_one(), &year()).unwrap();

        // 09:00 EST is 14:00 UTC
        assert_eq!(events[0].start.to_rfc3339(), "2025-02-05T15:00:00+01:00");
        assert_eq!(events[0].duration_minutes(), 60);
    }

    #[test]
    fn unknown_tzid_falls_back_to_display_zone() {
        let ics = wrap(
            "BEGIN:VEVENT\r\n\
             UID:odd@example.com\r\n\
             DTSTART;TZID=Not/A_Zone:20250205T090000\r\n\
             DTEND;TZID=Not/A_Zone:20250205T093000\r\n\
             SUMMARY:Odd zone\r\n\
             END:VEVENT\r\n",
        );
        let events = parse_ics_content(&ics, &plus_one(), &year()).unwrap();

        assert_eq!(events[0].start.to_rfc3339(), "2025-02-05T09:00:00+01:00");
    }

    #[test]
    fn missing_summary_gets_placeholder() {
        let ics = wrap(
            "BEGIN:VEVENT\r\n\
             UID:untitled@example.com\r\n\
             DTSTART:20250205T100000Z\r\n\
             DTEND:20250205T110000Z\r\n\
             END:VEVENT\r\n",
        );
        let events = parse_ics_content(&ics, &Utc, &year()).unwrap();

        assert_eq!(events[0].summary, UNTITLED);
    }

    #[test]
    fn event_without_start_is_skipped() {
        let ics = wrap(
            "BEGIN:VEVENT\r\n\
             UID:nostart@example.com\r\n\
             SUMMARY:Broken\r\n\
             END:VEVENT\r\n\
             BEGIN:VEVENT\r\n\
             UID:ok@example.com\r\n\
             DTSTART:20250205T100000Z\r\n\
             DTEND:20250205T110000Z\r\n\
             SUMMARY:Fine\r\n\
             END:VEVENT\r\n",
        );
        let events = parse_ics_content(&ics, &Utc, &year()).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Fine");
    }

    #[test]
    fn events_outside_window_are_dropped() {
        let events =
            parse_ics_content(&sample_ics(), &plus_one(), &day_of(2025, 2, 6, &plus_one())).unwrap();
        assert!(events.is_empty());
    }

    fn daily_standup(extra: &str) -> String {
        wrap(&format!(
            "BEGIN:VEVENT\r\n\
             UID:daily@example.com\r\n\
             DTSTART:20250203T080000Z\r\n\
             DTEND:20250203T081500Z\r\n\
             SUMMARY:Standup\r\n\
             {}\
             END:VEVENT\r\n",
            extra
        ))
    }

    #[test]
    fn daily_rule_repeats_into_later_days() {
        let ics = daily_standup("RRULE:FREQ=DAILY\r\n");
        let events = parse_ics_content(&ics, &plus_one(), &day_of(2025, 2, 5, &plus_one())).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Standup");
        assert_eq!(events[0].start.to_rfc3339(), "2025-02-05T09:00:00+01:00");
        assert_eq!(events[0].end.to_rfc3339(), "2025-02-05T09:15:00+01:00");
    }

    #[test]
    fn daily_rule_shows_as_current_meeting() {
        let ics = daily_standup("RRULE:FREQ=DAILY\r\n");
        let now = plus_one().with_ymd_and_hms(2025, 2, 5, 9, 5, 0).unwrap();
        let window = TimeWindow::day_of(&now).unwrap();

        let events = parse_ics_content(&ics, &plus_one(), &window).unwrap();
        let text = calstatus_core::compute_indicator_text(&events, now).unwrap();

        assert_eq!(text.as_deref(), Some("Standup"));
    }

    #[test]
    fn exdate_drops_occurrence() {
        let ics = daily_standup("RRULE:FREQ=DAILY\r\nEXDATE:20250205T080000Z\r\n");

        let dropped = parse_ics_content(&ics, &Utc, &day_of(2025, 2, 5, &Utc)).unwrap();
        assert!(dropped.is_empty());

        let kept = parse_ics_content(&ics, &Utc, &day_of(2025, 2, 6, &Utc)).unwrap();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn exdate_list_and_date_values() {
        let ics = daily_standup(
            "RRULE:FREQ=DAILY\r\n\
             EXDATE:20250204T080000Z,20250206T080000Z\r\n\
             EXDATE;VALUE=DATE:20250207\r\n",
        );
        let window = TimeWindow::new(
            Utc.with_ymd_and_hms(2025, 2, 3, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 9, 0, 0, 0).unwrap(),
        );
        let days: Vec<u32> = parse_ics_content(&ics, &Utc, &window)
            .unwrap()
            .iter()
            .map(|event| event.start.day())
            .collect();

        assert_eq!(days, vec![3, 5, 8]);
    }

    #[test]
    fn count_ends_the_series() {
        let ics = daily_standup("RRULE:FREQ=DAILY;COUNT=2\r\n");

        assert_eq!(
            parse_ics_content(&ics, &Utc, &day_of(2025, 2, 4, &Utc)).unwrap().len(),
            1
        );
        assert!(parse_ics_content(&ics, &Utc, &day_of(2025, 2, 5, &Utc)).unwrap().is_empty());
    }

    #[test]
    fn weekly_tzid_rule_follows_zone_across_dst() {
        let ics = wrap(
            "BEGIN:VEVENT\r\n\
             UID:weekly@example.com\r\n\
             DTSTART;TZID=Europe/Paris:20250303T090000\r\n\
             DTEND;TZID=Europe/Paris:20250303T100000\r\n\
             RRULE:FREQ=WEEKLY\r\n\
             SUMMARY:Weekly sync\r\n\
             END:VEVENT\r\n",
        );

        let winter = parse_ics_content(&ics, &Utc, &day_of(2025, 3, 24, &Utc)).unwrap();
        assert_eq!(winter[0].start, Utc.with_ymd_and_hms(2025, 3, 24, 8, 0, 0).unwrap());

        // Paris moved to CEST on March 30th
        let summer = parse_ics_content(&ics, &Utc, &day_of(2025, 4, 7, &Utc)).unwrap();
        assert_eq!(summer.len(), 1);
        assert_eq!(summer[0].start, Utc.with_ymd_and_hms(2025, 4, 7, 7, 0, 0).unwrap());
        assert_eq!(summer[0].duration_minutes(), 60);
    }

    #[test]
    fn floating_rule_keeps_wall_clock_time() {
        let ics = wrap(
            "BEGIN:VEVENT\r\n\
             UID:floating-daily@example.com\r\n\
             DTSTART:20250203T100000\r\n\
             DTEND:20250203T103000\r\n\
             RRULE:FREQ=DAILY\r\n\
             SUMMARY:Review\r\n\
             END:VEVENT\r\n",
        );
        let events = parse_ics_content(&ics, &plus_one(), &day_of(2025, 2, 5, &plus_one())).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start.to_rfc3339(), "2025-02-05T10:00:00+01:00");
        assert_eq!(events[0].duration_minutes(), 30);
    }

    #[test]
    fn edited_occurrence_replaces_generated_one() {
        let ics = wrap(
            "BEGIN:VEVENT\r\n\
             UID:daily@example.com\r\n\
             DTSTART:20250203T080000Z\r\n\
             DTEND:20250203T081500Z\r\n\
             RRULE:FREQ=DAILY\r\n\
             SUMMARY:Standup\r\n\
             END:VEVENT\r\n\
             BEGIN:VEVENT\r\n\
             UID:daily@example.com\r\n\
             RECURRENCE-ID:20250205T080000Z\r\n\
             DTSTART:20250205T100000Z\r\n\
             DTEND:20250205T101500Z\r\n\
             SUMMARY:Standup (moved)\r\n\
             END:VEVENT\r\n",
        );
        let events = parse_ics_content(&ics, &Utc, &day_of(2025, 2, 5, &Utc)).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Standup (moved)");
        assert_eq!(events[0].start, Utc.with_ymd_and_hms(2025, 2, 5, 10, 0, 0).unwrap());
    }

    #[test]
    fn invalid_rule_keeps_first_occurrence() {
        let ics = daily_standup("RRULE:FREQ=SOMETIMES\r\n");

        let events = parse_ics_content(&ics, &Utc, &year()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start, Utc.with_ymd_and_hms(2025, 2, 3, 8, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn fetch_from_file() {
        let mut file = tempfile::Builder::new().suffix(".ics").tempfile().unwrap();
        file.write_all(sample_ics().as_bytes()).unwrap();

        let source = IcsFileSource::new(file.path());
        let window = TimeWindow::new(
            Utc.with_ymd_and_hms(2025, 2, 4, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 6, 12, 0, 0).unwrap(),
        );

        let events = source.fetch_events(window).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start, Utc.with_ymd_and_hms(2025, 2, 5, 8, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = IcsFileSource::new("/nonexistent/calendar.ics");
        let window = TimeWindow::new(
            Utc.with_ymd_and_hms(2025, 2, 5, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 6, 0, 0, 0).unwrap(),
        );

        let err = source.fetch_events(window).await.unwrap_err();
        assert_eq!(err.code(), SourceErrorCode::Io);
        assert_eq!(err.source_name(), Some("ics"));
    }
}
