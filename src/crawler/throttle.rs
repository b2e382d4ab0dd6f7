//! Per-domain request throttle
//!
//! Keeps a fixed minimum delay between consecutive requests to the same
//! domain. Requests to different domains do not wait on each other.

use crate::state::DomainState;
use crate::url::extract_domain;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use url::Url;

pub struct Throttle {
    delay: Duration,
    domain_states: HashMap<String, DomainState>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            domain_states: HashMap::new(),
        }
    }

    /// Sleeps until `url`'s domain may be requested, then records the request
    pub async fn wait_turn(&mut self, url: &Url) {
        let domain = extract_domain(url).unwrap_or_default();
        let state = self.domain_states.entry(domain.clone()).or_default();

        if let Some(wait) = state.time_until_next_request(self.delay, Instant::now()) {
            tracing::debug!("Waiting {:?} before next request to {}", wait, domain);
            tokio::time::sleep(wait).await;
        }

        state.record_request(Instant::now());
    }

    /// Requests recorded across all domains
    pub fn total_requests(&self) -> u64 {
        self.domain_states.values().map(|s| s.request_count).sum()
    }
}
