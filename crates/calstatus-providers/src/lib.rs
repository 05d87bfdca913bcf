//! CalendarSource trait and implementations.
//!
//! This crate provides the layer between a calendar store and the indicator
//! core:
//!
//! - [`CalendarSource`] - The trait every calendar backend implements
//! - [`StaticSource`] - An in-memory source, for tests and fixed schedules
//! - [`JsonFileSource`] - Events read from a JSON file
//! - `IcsFileSource` - Events read from an iCalendar file (feature `ics`)
//! - [`fetch_day_events`] - Refresh a source and fetch one day, sorted
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   .ics file     │    │   .json file    │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────┐    ┌─────────────────┐
//! │  IcsFileSource  │    │ JsonFileSource  │
//! └────────┬────────┘    └────────┬────────┘
//!          │    CalendarSource    │
//!          └──────────┬───────────┘
//!                     ▼ fetch_day_events()
//!           ┌────────────────────┐
//!           │ Vec<CalendarEvent> │  sorted by start
//!           └────────────────────┘
//! ```

pub mod error;
#[cfg(feature = "ics")]
pub mod ics;
pub mod json;
pub mod source;

// Re-export main types at crate root
pub use error::{SourceError, SourceErrorCode, SourceResult};
#[cfg(feature = "ics")]
pub use ics::{IcsFileSource, parse_ics_content};
pub use json::{JsonFileSource, parse_json_events};
pub use source::{
    BoxFuture, CalendarSource, ErrorSource, StaticSource, events_in_window, fetch_day_events,
    open_file_source,
};
