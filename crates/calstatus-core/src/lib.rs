//! Core types: events, selection, time formatting, status rendering
//!
//! A refresh runs three stages over the raw events of one day:
//! [`filter_displayable_events`] drops all-day entries,
//! [`select_current_and_next`] picks what to show, and
//! [`format::render_status`] turns that into text.
//! [`compute_indicator_text`] chains the three.

pub mod error;
pub mod event;
pub mod filter;
pub mod format;
pub mod indicator;
pub mod select;
pub mod time;
pub mod tracing;

pub use error::{StatusError, StatusResult};
pub use event::{CalendarEvent, Selection};
pub use filter::filter_displayable_events;
pub use format::{
    StatusOptions, StatusRenderer, format_clock_time, format_duration_until, format_minutes,
    render_status, truncate_summary,
};
pub use indicator::{Indicator, IndicatorState, compute_indicator_text, contains_emoji};
pub use select::{select_current_and_next, select_current_and_next_within};
pub use time::TimeWindow;
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
