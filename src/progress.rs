use std::sync::Arc;

/// Events emitted by the fetcher and the store for progress reporting
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The podcast list is being retrieved
    FetchStarted { source: String },

    /// The podcast list arrived and was decoded
    FetchCompleted { podcast_count: usize },

    /// Retrieval failed; the store is now in its terminal failure state
    FetchFailed { error: String },

    /// Retrieval was cancelled before it finished
    FetchCancelled,

    /// A podcast referenced a genre id that is missing from the catalog
    GenreUnresolved { podcast_id: String, genre_id: u32 },

    /// The pipeline produced a new result
    PipelineRecomputed {
        /// Number of podcasts after filtering
        result_count: usize,
        /// Number of enriched podcasts before filtering
        total_count: usize,
    },
}

/// Trait for reporting progress events.
///
/// Implementations can use this to display spinners, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {}
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}

/// Reporter that forwards events to `tracing` at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchFailed { error } => tracing::warn!(%error, "fetch failed"),
            ProgressEvent::GenreUnresolved {
                podcast_id,
                genre_id,
            } => tracing::warn!(%podcast_id, genre_id, "unresolved genre id"),
            other => tracing::debug!(event = ?other, "progress"),
        }
    }
}

impl TracingReporter {
    /// Create a new TracingReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}

/// Reporter that records every event, for assertions in tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    events: std::sync::Mutex<Vec<ProgressEvent>>,
}

#[cfg(test)]
impl RecordingReporter {
    pub(crate) fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl ProgressReporter for RecordingReporter {
    fn report(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}
