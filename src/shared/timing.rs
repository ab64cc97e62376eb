//! Wall-clock timing for a single webhook request.

use std::time::Instant;

/// Measures the time from dispatch until the response headers arrive.
#[derive(Debug)]
pub struct RequestTiming {
    dispatched_at: Instant,
    headers_at: Option<Instant>,
}

impl RequestTiming {
    /// Starts the clock. Call immediately before handing the request to the client.
    pub fn start() -> Self {
        Self {
            dispatched_at: Instant::now(),
            headers_at: None,
        }
    }

    /// Marks the arrival of the response headers.
    pub fn mark_headers(&mut self) {
        self.headers_at = Some(Instant::now());
    }

    /// Elapsed milliseconds, measured up to now if headers were never marked.
    pub fn duration_ms(&self) -> u64 {
        self.headers_at
            .unwrap_or_else(Instant::now)
            .duration_since(self.dispatched_at)
            .as_millis() as u64
    }
}
