use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

/// Enforces a minimum spacing between outbound requests.
///
/// The lock is held while sleeping, so concurrent callers queue up behind one
/// another and each waits out the full interval from the most recent request.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub async fn throttle(&self) {
        let mut last_request = self.last_request.lock().await;
        if let Some(previous) = *last_request {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::debug!(wait_ms = wait.as_millis() as u64, "rate limit wait");
                sleep(wait).await;
            }
        }
        *last_request = Some(Instant::now());
    }
}
