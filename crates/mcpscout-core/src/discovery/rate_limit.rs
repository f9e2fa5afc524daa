//! Adapter-local request pacing.
//!
//! Each source adapter owns one `RateLimiter` and shares it across every
//! concurrent search, so parallel callers queue behind the same budget
//! instead of multiplying it. Built on `tokio::time` so tests drive it with
//! a paused runtime clock instead of real sleeps.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Leaky-bucket pacer: at most one permit per `interval`.
///
/// Fairness comes from the tokio `Mutex` queue: waiters are admitted in FIFO
/// order, each advancing the shared ready-time by one interval.
pub struct RateLimiter {
    interval: Duration,
    next_ready: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_ready: Mutex::new(None),
        }
    }

    /// Wait until a request slot is available.
    ///
    /// The first caller proceeds immediately; every subsequent caller is
    /// delayed so that consecutive permits are at least `interval` apart.
    pub async fn acquire(&self) {
        let mut next_ready = self.next_ready.lock().await;
        let now = Instant::now();

        let slot = match *next_ready {
            Some(ready) if ready > now => ready,
            _ => now,
        };
        *next_ready = Some(slot + self.interval);

        // Hold the lock across the sleep: that is what serializes
        // concurrent callers onto the shared budget.
        if slot > now {
            tokio::time::sleep_until(slot).await;
        }
    }
}
