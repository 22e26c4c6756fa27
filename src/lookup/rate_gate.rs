//! Per-origin request pacing.
//!
//! MusicBrainz allows one request per second per client. Every call to a
//! gated origin goes through [`RateGate::acquire`], which holds that origin's
//! lock while it waits out the remaining interval and stamps the issue time.
//! Tokio's mutex is fair, so concurrent callers queue in arrival order instead
//! of racing on the "time since last request" check.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Minimum spacing between two requests to the same origin.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1100);

/// Serializes outbound requests per origin.
///
/// Share one instance (behind an `Arc`) between every client that talks to
/// the same service.
#[derive(Debug)]
pub struct RateGate {
    interval: Duration,
    origins: Mutex<HashMap<String, Arc<Mutex<Option<Instant>>>>>,
}

impl RateGate {
    /// Create a gate with the standard MusicBrainz interval.
    pub fn new() -> Self {
        Self::with_interval(MIN_REQUEST_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            origins: Mutex::new(HashMap::new()),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until a request to `origin` may be issued, then record it as issued.
    pub async fn acquire(&self, origin: &str) {
        let slot = {
            let mut origins = self.origins.lock().await;
            Arc::clone(origins.entry(origin.to_string()).or_default())
        };

        let mut last_issued = slot.lock().await;
        if let Some(previous) = *last_issued {
            let ready_at = previous + self.interval;
            let now = Instant::now();
            if ready_at > now {
                tracing::debug!(
                    "Rate gate: waiting {}ms before next request to {}",
                    (ready_at - now).as_millis(),
                    origin
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last_issued = Some(Instant::now());
    }
}

impl Default for RateGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_request_is_immediate() {
        let gate = RateGate::new();
        let start = Instant::now();
        gate.acquire("musicbrainz.org").await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_requests_are_spaced() {
        let gate = RateGate::new();
        let start = Instant::now();
        gate.acquire("musicbrainz.org").await;
        gate.acquire("musicbrainz.org").await;
        assert!(start.elapsed() >= MIN_REQUEST_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_only_for_remainder() {
        let gate = RateGate::new();
        gate.acquire("musicbrainz.org").await;
        tokio::time::sleep(Duration::from_millis(800)).await;

        let start = Instant::now();
        gate.acquire("musicbrainz.org").await;
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(300));
        assert!(waited < MIN_REQUEST_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_origins_are_independent() {
        let gate = RateGate::new();
        let start = Instant::now();
        gate.acquire("musicbrainz.org").await;
        gate.acquire("coverartarchive.org").await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_queue() {
        let gate = Arc::new(RateGate::new());
        let start = Instant::now();

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let gate = Arc::clone(&gate);
                tokio::spawn(async move {
                    gate.acquire("musicbrainz.org").await;
                    Instant::now()
                })
            })
            .collect();

        let mut issued = Vec::new();
        for handle in handles {
            issued.push(handle.await.unwrap());
        }
        issued.sort();

        assert!(issued[1] - issued[0] >= MIN_REQUEST_INTERVAL);
        assert!(issued[2] - issued[1] >= MIN_REQUEST_INTERVAL);
        assert!(start.elapsed() >= MIN_REQUEST_INTERVAL * 2);
    }
}
