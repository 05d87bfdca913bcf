//! Error types for the status pipeline.
//!
//! Errors are raised where an invariant first becomes checkable: span
//! checks in the filter, ordering checks on selector entry, and minute
//! counts on the formatting boundary. An `Err` always means malformed
//! input; "nothing to show" is reported as `Ok(None)`.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// An error raised by the status pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    /// The event list handed to the selector is not sorted by start.
    #[error(
        "events are not ordered by start: event #{index} ({summary:?}) starts at {start}, before {previous_start}"
    )]
    InvalidEventOrdering {
        /// Position of the first out-of-order event.
        index: usize,
        /// Title of the out-of-order event.
        summary: String,
        /// Its start time.
        start: DateTime<FixedOffset>,
        /// Start time of the event right before it.
        previous_start: DateTime<FixedOffset>,
    },

    /// An event ends before it starts.
    #[error("event {summary:?} ends at {end}, before it starts at {start}")]
    InvalidEventSpan {
        /// Title of the malformed event.
        summary: String,
        /// Its start time.
        start: DateTime<FixedOffset>,
        /// Its end time.
        end: DateTime<FixedOffset>,
    },

    /// A negative minute count reached the duration formatter.
    #[error("malformed duration: {minutes} minutes")]
    MalformedDuration {
        /// The rejected minute count.
        minutes: i64,
    },
}

impl StatusError {
    /// Returns a short, stable name for this error kind, suitable for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEventOrdering { .. } => "invalid_event_ordering",
            Self::InvalidEventSpan { .. } => "invalid_event_span",
            Self::MalformedDuration { .. } => "malformed_duration",
        }
    }
}

/// A specialized Result type for status operations.
pub type StatusResult<T> = Result<T, StatusError>;
