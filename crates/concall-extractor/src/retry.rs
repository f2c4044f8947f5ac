//! Bounded retry with linear backoff
//!
//! ```text
//! attempt 1 ──fail──▶ sleep 1×base ──▶ attempt 2 ──fail──▶ sleep 2×base ──▶ attempt 3 ──fail──▶ Err
//! ```
//!
//! No delay follows the final attempt.

use backoff::backoff::Backoff;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tracing::warn;

/// All attempts failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryError<E> {
    /// Attempts made
    pub attempts: u32,
    /// Error returned by the final attempt
    pub last: E,
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gave up after {} attempts: {}", self.attempts, self.last)
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for RetryError<E> {}

/// Backoff policy yielding `n × base` after the `n`th failure, and nothing
/// once `max_attempts` attempts have been made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearBackoff {
    base: Duration,
    max_attempts: u32,
    failures: u32,
}

impl LinearBackoff {
    /// A policy allowing `max_attempts` attempts (zero is treated as one)
    pub fn new(base: Duration, max_attempts: u32) -> Self {
        Self {
            base,
            max_attempts: max_attempts.max(1),
            failures: 0,
        }
    }

    /// Total attempts this policy allows
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Backoff for LinearBackoff {
    fn reset(&mut self) {
        self.failures = 0;
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        if self.failures + 1 >= self.max_attempts {
            return None;
        }
        self.failures += 1;
        Some(self.base * self.failures)
    }
}

/// Run `op` until it succeeds or `max_attempts` attempts have failed
///
/// `op` receives the 1-based attempt number. After failed attempt `n` (when
/// another attempt remains) the task sleeps `n × base_delay`. A `max_attempts`
/// of zero is treated as one.
///
/// # Examples
///
/// ```
/// use concall_extractor::retry_with_backoff;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let result = retry_with_backoff(3, Duration::ZERO, |attempt| async move {
///     if attempt < 2 { Err("not yet") } else { Ok(attempt) }
/// })
/// .await;
/// assert_eq!(result.unwrap(), 2);
/// # }
/// ```
pub async fn retry_with_backoff<T, E, F, Fut>(
    max_attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let policy = LinearBackoff::new(base_delay, max_attempts);
    let max_attempts = policy.max_attempts();
    let attempts = AtomicU32::new(0);

    let outcome = backoff::future::retry_notify(
        policy,
        || {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            let fut = op(attempt);
            async move { fut.await.map_err(backoff::Error::transient) }
        },
        |e: E, delay: Duration| {
            warn!(
                "Attempt {}/{} failed: {}; retrying in {:?}",
                attempts.load(Ordering::SeqCst),
                max_attempts,
                e,
                delay
            );
        },
    )
    .await;

    outcome.map_err(|last| RetryError {
        attempts: attempts.load(Ordering::SeqCst),
        last,
    })
}
