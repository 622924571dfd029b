//! Failed-login throttling.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Failures allowed per window before a client is blocked.
pub const DEFAULT_MAX_FAILURES: u32 = 5;

/// Length of the failure-counting window.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);

#[derive(Debug)]
struct FailureWindow {
    count: u32,
    window_start: Instant,
}

/// Per-client failed-login counter over a fixed window.
#[derive(Debug, Clone)]
pub struct LoginThrottle {
    inner: Arc<Mutex<HashMap<String, FailureWindow>>>,
    max_failures: u32,
    window: Duration,
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FAILURES, DEFAULT_WINDOW)
    }
}

impl LoginThrottle {
    #[must_use]
    pub fn new(max_failures: u32, window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            max_failures,
            window,
        }
    }

    /// Whether further attempts from this client are currently rejected.
    pub async fn is_blocked(&self, client: &str) -> bool {
        let mut map = self.inner.lock().await;
        let now = Instant::now();

        let expired = map
            .get(client)
            .is_some_and(|entry| now.duration_since(entry.window_start) >= self.window);

        if expired {
            map.remove(client);

            return false;
        }

        map.get(client)
            .is_some_and(|entry| entry.count >= self.max_failures)
    }

    /// Record one failed attempt for this client.
    pub async fn record_failure(&self, client: &str) {
        let mut map = self.inner.lock().await;
        let now = Instant::now();

        let entry = map.entry(client.to_owned()).or_insert(FailureWindow {
            count: 0,
            window_start: now,
        });

        // Reset window if expired
        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
    }

    /// Drop entries whose window has expired.
    pub async fn cleanup(&self) {
        let mut map = self.inner.lock().await;
        let now = Instant::now();

        map.retain(|_client, entry| now.duration_since(entry.window_start) < self.window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT: &str = "203.0.113.7";

    #[tokio::test(start_paused = true)]
    async fn below_limit_is_not_blocked() {
        let throttle = LoginThrottle::default();

        for _attempt in 0..4 {
            throttle.record_failure(CLIENT).await;
        }

        assert!(!throttle.is_blocked(CLIENT).await);
    }

    #[tokio::test(start_paused = true)]
    async fn fifth_failure_blocks_the_sixth_attempt() {
        let throttle = LoginThrottle::default();

        for _attempt in 0..5 {
            throttle.record_failure(CLIENT).await;
        }

        assert!(throttle.is_blocked(CLIENT).await);
    }

    #[tokio::test(start_paused = true)]
    async fn other_clients_are_unaffected() {
        let throttle = LoginThrottle::default();

        for _attempt in 0..5 {
            throttle.record_failure(CLIENT).await;
        }

        assert!(!throttle.is_blocked("198.51.100.9").await);
    }

    #[tokio::test(start_paused = true)]
    async fn window_expiry_unblocks() {
        let throttle = LoginThrottle::default();

        for _attempt in 0..5 {
            throttle.record_failure(CLIENT).await;
        }

        tokio::time::advance(DEFAULT_WINDOW + Duration::from_secs(1)).await;

        assert!(!throttle.is_blocked(CLIENT).await);
    }

    #[tokio::test(start_paused = true)]
    async fn cleanup_drops_expired_entries() {
        let throttle = LoginThrottle::default();

        throttle.record_failure(CLIENT).await;

        tokio::time::advance(DEFAULT_WINDOW + Duration::from_secs(1)).await;

        throttle.cleanup().await;

        assert!(!throttle.is_blocked(CLIENT).await);
    }
}
