use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Client-side politeness limiter for the content API.
///
/// Spaces requests at least `min_interval` apart; callers `wait()` before
/// every request and are delayed only when firing faster than the budget.
pub struct RateLimiter {
    next_allowed: Mutex<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second);
        Self {
            next_allowed: Mutex::new(Instant::now()),
            min_interval,
        }
    }

    pub async fn wait(&self) {
        let mut next = self.next_allowed.lock().await;
        let now = Instant::now();

        if *next > now {
            sleep_until(*next).await;
        }

        *next = Instant::now() + self.min_interval;
    }
}
