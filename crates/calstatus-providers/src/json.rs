//! JSON calendar files.
//!
//! The file holds an array of events, each with a `summary` and RFC 3339
//! `start` and `end` timestamps:
//!
//! ```json
//! [
//!   {"summary": "Standup", "start": "2025-02-05T09:00:00+01:00", "end": "2025-02-05T09:15:00+01:00"}
//! ]
//! ```
//!
//! Timestamps keep the offset written in the file, which is also the offset
//! used to display them.

use std::path::{Path, PathBuf};

use calstatus_core::{CalendarEvent, TimeWindow};
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::source::{BoxFuture, CalendarSource, events_in_window};

const SOURCE_NAME: &str = "json";

/// Parses a JSON array of events.
///
/// # Errors
///
/// Returns a parse error when the content is not a valid event array.
pub fn parse_json_events(content: &str) -> SourceResult<Vec<CalendarEvent>> {
    serde_json::from_str(content).map_err(|e| {
        SourceError::parse(format!("invalid event list: {}", e))
            .with_source_name(SOURCE_NAME)
            .with_cause(e)
    })
}

/// A source reading events from a JSON file at every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
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

impl CalendarSource for JsonFileSource {
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

            let events = parse_json_events(&content)?;
            debug!(path = %self.path.display(), count = events.len(), "Loaded JSON calendar");
            Ok(events_in_window(events, &window))
        })
    }
}
