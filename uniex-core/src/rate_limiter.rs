//! Request throttling.
//!
//! A token-bucket limiter applied before dispatch when the configuration
//! enables it. This is a throttle only: it delays requests to stay under the
//! venue's cap, it never retries anything.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Token-bucket settings.
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Bucket capacity: burst size in requests.
    pub capacity: u32,
    /// Window over which a full bucket refills.
    pub refill_period: Duration,
}

impl RateLimiterConfig {
    /// A limiter allowing `capacity` requests per `refill_period`.
    pub fn new(capacity: u32, refill_period: Duration) -> Self {
        Self {
            capacity,
            refill_period,
        }
    }
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        // 10 requests per second, the common private-endpoint cap.
        Self::new(10, Duration::from_secs(1))
    }
}

#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

/// Shared token-bucket rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    state: Arc<Mutex<BucketState>>,
}

impl RateLimiter {
    /// Create a limiter from settings.
    pub fn new(config: RateLimiterConfig) -> Self {
        let state = BucketState {
            tokens: f64::from(config.capacity),
            last_refill: Instant::now(),
        };
        Self {
            config,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Wait until one request token is available, then consume it.
    pub async fn acquire(&self) {
        self.acquire_weight(1).await;
    }

    /// Wait until `weight` tokens are available, then consume them. Venues
    /// price some endpoints at more than one request unit.
    pub async fn acquire_weight(&self, weight: u32) {
        let cost = f64::from(weight.min(self.config.capacity));
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                self.refill(&mut state);
                if state.tokens >= cost {
                    state.tokens -= cost;
                    None
                } else {
                    let deficit = cost - state.tokens;
                    let rate = f64::from(self.config.capacity)
                        / self.config.refill_period.as_secs_f64();
                    Some(Duration::from_secs_f64(deficit / rate))
                }
            };
            match wait {
                None => return,
                Some(delay) => sleep(delay).await,
            }
        }
    }

    fn refill(&self, state: &mut BucketState) {
        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refill).as_secs_f64();
        let rate = f64::from(self.config.capacity) / self.config.refill_period.as_secs_f64();
        state.tokens = (state.tokens + elapsed * rate).min(f64::from(self.config.capacity));
        state.last_refill = now;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimiterConfig::default())
    }
}
