use std::time::{Duration, Instant};

/// Tracks request timing for one domain
///
/// Used by the throttle to keep a fixed minimum delay between consecutive
/// requests to the same host.
#[derive(Debug, Clone, Default)]
pub struct DomainState {
    /// Number of requests made to this domain in the current run
    pub request_count: u64,

    /// Timestamp of the last request to this domain
    pub last_request_time: Option<Instant>,
}

impl DomainState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a request was made to this domain
    pub fn record_request(&mut self, now: Instant) {
        self.request_count += 1;
        self.last_request_time = Some(now);
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_next_request(&self, delay: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.saturating_duration_since(last);
        (elapsed < delay).then(|| delay - elapsed)
    }
}
