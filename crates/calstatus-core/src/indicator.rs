//! Indicator entry point and display state.
//!
//! [`compute_indicator_text`] runs the whole pipeline for one refresh:
//! all-day filtering, current/next selection, then status rendering.
//! [`Indicator::compute_state`] additionally derives what a status-bar
//! front end needs to draw: visibility, whether to show the calendar icon,
//! and a tooltip listing the selected events.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::StatusResult;
use crate::event::{CalendarEvent, Selection};
use crate::filter::filter_displayable_events;
use crate::format::{StatusOptions, StatusRenderer, format_clock_time};
use crate::select::select_current_and_next_within;

/// Emoji blocks that make the calendar icon redundant next to a title.
static EMOJI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}",
        r"\x{1F700}-\x{1F77F}\x{1F780}-\x{1F7FF}\x{1F800}-\x{1F8FF}",
        r"\x{1F900}-\x{1F9FF}\x{1FA00}-\x{1FA6F}\x{1FA70}-\x{1FAFF}",
        r"\x{2600}-\x{26FF}\x{2700}-\x{27BF}]"
    ))
    .expect("Invalid emoji regex")
});

/// Returns true if `text` contains a pictographic emoji or dingbat.
pub fn contains_emoji(text: &str) -> bool {
    EMOJI_REGEX.is_match(text)
}

/// What a status-bar front end should display after a refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorState {
    /// Whether the indicator should be shown at all.
    pub visible: bool,
    /// Status text; empty when hidden.
    pub text: String,
    /// Whether to show the calendar icon before the text.
    pub show_icon: bool,
    /// One line per selected event, current first.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub tooltip: String,
}

impl IndicatorState {
    /// The hidden state, used when there is nothing to show or the refresh
    /// failed.
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Builds the display state from a selection and its rendered text.
    ///
    /// The indicator is hidden when `text` is `None` or empty. The icon is
    /// suppressed when any selected title already carries an emoji.
    pub fn from_selection(selection: &Selection<'_>, text: Option<String>) -> Self {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return Self::hidden();
        };

        let show_icon = !selection.events().any(|e| contains_emoji(&e.summary));
        let tooltip = selection
            .events()
            .map(tooltip_line)
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            visible: true,
            text,
            show_icon,
            tooltip,
        }
    }
}

fn tooltip_line(event: &CalendarEvent) -> String {
    format!(
        "{} - {} {}",
        format_clock_time(event.start),
        format_clock_time(event.end),
        event.summary
    )
}

/// Runs the filter, selector and renderer with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Indicator {
    renderer: StatusRenderer,
}

impl Indicator {
    /// Creates a new Indicator with the given options.
    pub fn new(options: StatusOptions) -> Self {
        Self {
            renderer: StatusRenderer::new(options),
        }
    }

    /// Creates a new Indicator with default options.
    pub fn with_defaults() -> Self {
        Self::new(StatusOptions::default())
    }

    /// Computes the status text for today's raw events.
    ///
    /// Returns `Ok(None)` when there is nothing to show.
    ///
    /// # Errors
    ///
    /// Returns an error if an event ends before it starts or the events are
    /// not ordered by start.
    pub fn compute_text(
        &self,
        raw_events: &[CalendarEvent],
        now: DateTime<FixedOffset>,
    ) -> StatusResult<Option<String>> {
        let events = filter_displayable_events(raw_events)?;
        let (_, text) = self.evaluate(&events, now)?;
        Ok(text)
    }

    /// Computes the full display state for today's raw events.
    ///
    /// # Errors
    ///
    /// Same as [`Indicator::compute_text`].
    pub fn compute_state(
        &self,
        raw_events: &[CalendarEvent],
        now: DateTime<FixedOffset>,
    ) -> StatusResult<IndicatorState> {
        let events = filter_displayable_events(raw_events)?;
        let (selection, text) = self.evaluate(&events, now)?;
        Ok(IndicatorState::from_selection(&selection, text))
    }

    fn evaluate<'e>(
        &self,
        events: &'e [CalendarEvent],
        now: DateTime<FixedOffset>,
    ) -> StatusResult<(Selection<'e>, Option<String>)> {
        let look_ahead = self.renderer.options().look_ahead();
        let selection = select_current_and_next_within(events, now, look_ahead)?;
        let text = self.renderer.render(&selection, now);
        Ok((selection, text))
    }
}

/// Computes the status text for today's raw events with default options.
///
/// See [`Indicator::compute_text`].
pub fn compute_indicator_text(
    raw_events: &[CalendarEvent],
    now: DateTime<FixedOffset>,
) -> StatusResult<Option<String>> {
    Indicator::with_defaults().compute_text(raw_events, now)
}
