use labelgate_core::Verbosity;
use labelgate_filter::FilterEngine;

/// Default request body limit. The scheduler sends every candidate `Node`
/// in full, so large clusters produce multi-megabyte bodies; no cap by default.
pub const DEFAULT_MAX_BODY_BYTES: usize = usize::MAX;

/// Shared application state
pub struct AppState {
    /// Filter engine applied to every request
    pub engine: FilterEngine,

    /// Log-level gate for request dumps and traces
    pub verbosity: Verbosity,

    /// Largest request body accepted
    pub max_body_bytes: usize,
}

impl AppState {
    /// Create a new AppState with the default body limit
    pub fn new(engine: FilterEngine, verbosity: Verbosity) -> Self {
        Self {
            engine,
            verbosity,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Override the request body limit
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FilterEngine::default(), Verbosity::default())
    }
}
