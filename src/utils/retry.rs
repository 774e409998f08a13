//! Fixed-delay bounded retry.
//!
//! Credential reports are generated asynchronously by IAM, so the first few
//! retrieval calls after a generation request commonly fail. [`retry_fixed`]
//! re-runs an async operation a fixed number of times with a constant pause
//! between attempts. There is no backoff or jitter.

use std::future::Future;
use std::time::Duration;

/// Maximum attempts and the pause between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Number of attempts actually made; a zero budget still runs once.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    /// 10 attempts, one second apart.
    fn default() -> Self {
        Self::new(10, Duration::from_secs(1))
    }
}

/// Every attempt failed; holds the error from the final one.
#[derive(Debug)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

/// Run `operation` until it succeeds or the policy's attempts are used up.
///
/// The closure receives the 1-based attempt number. The delay is only slept
/// between attempts, never after the last one.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use aws_credential_report::utils::retry::{retry_fixed, RetryPolicy};
///
/// let rt = tokio::runtime::Builder::new_current_thread()
///     .enable_time()
///     .build()
///     .unwrap();
/// let policy = RetryPolicy::new(3, Duration::from_millis(1));
/// let value = rt.block_on(retry_fixed(&policy, |attempt| async move {
///     if attempt < 3 { Err("not ready") } else { Ok(attempt) }
/// }));
/// assert_eq!(value.unwrap(), 3);
/// ```
pub async fn retry_fixed<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(last_error) if attempt >= attempts => {
                return Err(RetryExhausted {
                    attempts,
                    last_error,
                })
            }
            Err(_) => {
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
