//! CalendarSource trait definition.
//!
//! A [`CalendarSource`] is anything that can list the events of a time
//! window: a calendar file on disk, an in-memory schedule, or a remote store.
//! The indicator asks its source for one local day at every refresh, through
//! [`fetch_day_events`].

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use calstatus_core::{CalendarEvent, TimeWindow};
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::json::JsonFileSource;

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe, so the client can hold a
/// `Box<dyn CalendarSource>` chosen at runtime.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The core abstraction for calendar backends.
///
/// # Implementation Notes
///
/// - Implementations should be `Send + Sync` for use in async contexts
/// - `fetch_events` may return events outside the window or out of order;
///   [`fetch_day_events`] trims and sorts them
/// - Recurring events are expected to be expanded already
pub trait CalendarSource: Send + Sync {
    /// Returns the name/type of this source (e.g., "ics", "json").
    fn name(&self) -> &str;

    /// Reloads the underlying data before a fetch.
    ///
    /// The default implementation does nothing.
    fn refresh(&self) -> BoxFuture<'_, SourceResult<()>> {
        Box::pin(async { Ok(()) })
    }

    /// Fetches the events overlapping `window`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the data cannot be read or parsed.
    fn fetch_events(&self, window: TimeWindow) -> BoxFuture<'_, SourceResult<Vec<CalendarEvent>>>;
}

/// Keeps the events overlapping `window`, sorted by start time.
///
/// The sort is stable, so events sharing a start keep the source's order.
pub fn events_in_window(
    events: impl IntoIterator<Item = CalendarEvent>,
    window: &TimeWindow,
) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = events
        .into_iter()
        .filter(|event| window.overlaps_event(event))
        .collect();
    events.sort_by_key(|event| event.start);
    events
}

/// Refreshes `source` and fetches the events of `window`.
///
/// The result only holds events overlapping the window, ordered by start,
/// ready for the indicator core.
///
/// # Errors
///
/// Returns the source's error if the refresh or the fetch fails.
pub async fn fetch_day_events(
    source: &dyn CalendarSource,
    window: TimeWindow,
) -> SourceResult<Vec<CalendarEvent>> {
    source.refresh().await?;
    let fetched = source.fetch_events(window).await?;
    let fetched_count = fetched.len();
    let events = events_in_window(fetched, &window);

    debug!(
        source = source.name(),
        fetched = fetched_count,
        kept = events.len(),
        "Fetched day events"
    );

    Ok(events)
}

/// Opens a file-backed source, picking the format from the file extension.
///
/// `.ics` files need the `ics` feature; `.json` files are always supported.
///
/// # Errors
///
/// Returns a configuration error for an unsupported extension.
pub fn open_file_source(path: &Path) -> SourceResult<Box<dyn CalendarSource>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        #[cfg(feature = "ics")]
        Some("ics") => Ok(Box::new(crate::ics::IcsFileSource::new(path))),
        Some("json") => Ok(Box::new(JsonFileSource::new(path))),
        _ => Err(SourceError::configuration(format!(
            "unsupported calendar file: {}",
            path.display()
        ))),
    }
}

/// A source serving a fixed list of events.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    name: String,
    events: Vec<CalendarEvent>,
}

impl StaticSource {
    /// Creates a new static source.
    pub fn new(name: impl Into<String>, events: Vec<CalendarEvent>) -> Self {
        Self {
            name: name.into(),
            events,
        }
    }

    /// Returns every event held by this source.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }
}

impl CalendarSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_events(&self, window: TimeWindow) -> BoxFuture<'_, SourceResult<Vec<CalendarEvent>>> {
        let events: Vec<CalendarEvent> = self
            .events
            .iter()
            .filter(|event| window.overlaps_event(event))
            .cloned()
            .collect();
        Box::pin(async move { Ok(events) })
    }
}

/// A source that always returns an error.
///
/// Stands in for a source that failed to initialize, so the refresh loop
/// still runs and hides the indicator.
#[derive(Debug)]
pub struct ErrorSource {
    name: String,
    error: SourceError,
}

impl ErrorSource {
    /// Creates a new error source.
    pub fn new(name: impl Into<String>, error: SourceError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }

    fn make_error(&self) -> SourceError {
        SourceError::new(self.error.code(), self.error.message()).with_source_name(&self.name)
    }
}

impl CalendarSource for ErrorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn refresh(&self) -> BoxFuture<'_, SourceResult<()>> {
        let error = self.make_error();
        Box::pin(async move { Err(error) })
    }

    fn fetch_events(&self, _window: TimeWindow) -> BoxFuture<'_, SourceResult<Vec<CalendarEvent>>> {
        let error = self.make_error();
        Box::pin(async move { Err(error) })
    }
}
