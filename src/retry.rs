use crate::error::Error;
use crate::transport::Endpoint;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

/// Total attempts for one logical call (1 initial + 3 retries)
pub const MAX_ATTEMPTS: u32 = 4;

/// Spacing between attempts.
///
/// The number of attempts is fixed at [`MAX_ATTEMPTS`]; only the delays are
/// configurable.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Initial delay before the first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff (e.g., 2.0 doubles the delay each time)
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Create a new retry configuration
    pub fn new(initial_delay: Duration) -> Self {
        Self {
            initial_delay,
            max_delay: Duration::from_secs(2),
            backoff_multiplier: 2.0,
        }
    }

    /// Set the maximum delay between retries
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Set the backoff multiplier
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Preset: retry right away, no waiting between attempts
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Calculate the delay for a given attempt number (0-indexed)
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 || self.initial_delay.is_zero() {
            return Duration::ZERO;
        }

        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi((attempt - 1) as i32);

        let delay = Duration::from_millis(delay_ms as u64);
        delay.min(self.max_delay)
    }
}

impl Default for RetryConfig {
    /// Delays: 250ms, 500ms, 1s = 1.75s worst-case wait
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

/// Values the retry loop can recognise as "nothing came back".
pub trait EmptyResult {
    fn is_empty_result(&self) -> bool;
}

impl EmptyResult for String {
    fn is_empty_result(&self) -> bool {
        self.is_empty()
    }
}

impl<T> EmptyResult for Vec<T> {
    fn is_empty_result(&self) -> bool {
        self.is_empty()
    }
}

/// Run one logical request against `endpoint` with at most [`MAX_ATTEMPTS`] attempts.
///
/// `operation` receives the attempt number (0-indexed) and must rebuild the
/// whole request each time. An attempt is repeated when it
/// - succeeds but yields `None` or an empty value, or
/// - fails with an error classified as retryable.
///
/// Failures are logged at error level, retries at warn level. The result is
/// `None` once attempts run out or on a non-retryable failure.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, endpoint: Endpoint, mut operation: F) -> Option<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<T>, Error>>,
    T: EmptyResult,
{
    for attempt in 0..MAX_ATTEMPTS {
        // Wait before retry (except for first attempt)
        let delay = config.delay_for_attempt(attempt);
        if !delay.is_zero() {
            debug!(
                "{}: Retry attempt {}/{} after {:?}",
                endpoint,
                attempt + 1,
                MAX_ATTEMPTS,
                delay
            );
            sleep(delay).await;
        }

        let has_retries_left = attempt + 1 < MAX_ATTEMPTS;

        match operation(attempt).await {
            Ok(Some(value)) if !value.is_empty_result() => {
                if attempt > 0 {
                    debug!(
                        "{}: Succeeded on attempt {}/{}",
                        endpoint,
                        attempt + 1,
                        MAX_ATTEMPTS
                    );
                }
                return Some(value);
            }
            Ok(_) => {
                if !has_retries_left {
                    debug!(
                        "{}: Still empty after {} attempts, giving up",
                        endpoint, MAX_ATTEMPTS
                    );
                    return None;
                }
                warn!(
                    "{}: Attempt {}/{} returned an empty result, retrying",
                    endpoint,
                    attempt + 1,
                    MAX_ATTEMPTS
                );
            }
            Err(e) => {
                error!(
                    "{}: Attempt {}/{} failed: {}",
                    endpoint,
                    attempt + 1,
                    MAX_ATTEMPTS,
                    e
                );

                if !e.is_retryable() {
                    debug!("{}: Error is not retryable, giving up", endpoint);
                    return None;
                }
                if !has_retries_left {
                    return None;
                }

                warn!(
                    "{}: Retrying after failure ({} retries remaining)",
                    endpoint,
                    MAX_ATTEMPTS - attempt - 1
                );
            }
        }
    }

    None
}
