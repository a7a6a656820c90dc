use std::fmt::Display;
use std::future::Future;
use std::hash::{BuildHasher, RandomState};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

/// Backoff schedule for reaching the database.
///
/// Retry `n` (1-based) waits `initial_delay_ms * backoff_multiplier^(n-1)`, capped at
/// `max_delay_ms`. With `use_jitter` each wait lands somewhere in the upper half of that.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub use_jitter: bool,
}

impl RetryConfig {
    /// Schedule for service boot, when the database may still be coming up.
    pub fn startup() -> Self {
        Self {
            max_retries: 5,
            initial_delay_ms: 500,
            max_delay_ms: 10_000,
            ..Self::default()
        }
    }

    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(i32::MAX as u32) as i32;
        let millis = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(exponent);
        let capped = (millis as u64).min(self.max_delay_ms);

        if self.use_jitter {
            Duration::from_millis(jitter(capped))
        } else {
            Duration::from_millis(capped)
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5_000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Runs `operation` until it succeeds or `config.max_retries` retries have failed.
///
/// The error of the final attempt is returned.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut retry = 0;
    loop {
        let err = match operation().await {
            Ok(value) => {
                if retry > 0 {
                    debug!(retries = retry, "Connected after retrying");
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if retry == config.max_retries {
            warn!(attempts = retry + 1, error = %err, "Giving up");
            return Err(err);
        }
        retry += 1;

        let wait = config.delay_for(retry);
        warn!(
            retry,
            of = config.max_retries,
            wait_ms = wait.as_millis() as u64,
            error = %err,
            "Attempt failed"
        );
        tokio::time::sleep(wait).await;
    }
}

// 50..100% of `millis`, seeded from the clock
fn jitter(millis: u64) -> u64 {
    let roll = RandomState::new().hash_one(SystemTime::now()) % 51;
    millis * (50 + roll) / 100
}
