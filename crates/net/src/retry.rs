//! Bounded retry execution with exponential backoff
//!
//! Classification is a match on the typed error, not on message text: the
//! error taxonomy decides retryability, and a rate-limit error may carry a
//! server-specified delay that overrides the exponential schedule.

use pkgprobe_errors::{Error, Result, UserFacingError};
use reqwest::Response;
use std::future::Future;
use std::time::Duration;

/// Retry executor configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Derive a policy from the application config
    #[must_use]
    pub fn from_config(config: &pkgprobe_config::RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }

    /// Delay before the attempt after `attempt_index` failed
    ///
    /// A server-supplied retry-after wins over the exponential schedule
    /// `base_delay * 2^attempt_index`; both are capped at `max_delay`.
    #[must_use]
    pub fn delay_for(&self, attempt_index: u32, server_retry_after: Option<u64>) -> Duration {
        let delay = match server_retry_after {
            Some(secs) => Duration::from_secs(secs),
            None => {
                let factor = 2u32.saturating_pow(attempt_index);
                self.base_delay.saturating_mul(factor)
            }
        };
        delay.min(self.max_delay)
    }
}

/// Execute an operation with bounded retries
///
/// The operation runs up to `max_retries + 1` times. Terminal errors are
/// re-raised immediately without consuming further attempts; once retries
/// are exhausted, the last error is re-raised to the caller.
///
/// # Errors
///
/// Returns the operation's last error when it is terminal or all attempts
/// are exhausted.
pub async fn execute_with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if !e.is_retryable() || attempt >= policy.max_retries {
                    return Err(e);
                }
                let delay = policy.delay_for(attempt, e.retry_after_secs());
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Parse a whole-seconds `Retry-After` header from a response
///
/// HTTP-date and fractional forms are treated as absent.
#[must_use]
pub fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgprobe_errors::{Error, NetworkError};

    fn quick_policy() -> RetryPolicy {
        RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }

    #[test]
    fn exponential_schedule_doubles() {
        let policy = quick_policy();
        assert_eq!(policy.delay_for(0, None), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1, None), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2, None), Duration::from_secs(4));
    }

    #[test]
    fn server_retry_after_overrides_schedule() {
        let policy = quick_policy();
        assert_eq!(policy.delay_for(0, Some(5)), Duration::from_secs(5));
        assert_eq!(policy.delay_for(2, Some(5)), Duration::from_secs(5));
    }

    #[test]
    fn delays_are_capped() {
        let policy = RetryPolicy {
            max_retries: 10,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(8),
        };
        assert_eq!(policy.delay_for(6, None), Duration::from_secs(8));
        assert_eq!(policy.delay_for(0, Some(600)), Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_transient_failures() {
        let policy = quick_policy();
        let mut attempts = 0u32;
        let result = execute_with_retry(&policy, || {
            attempts += 1;
            let outcome = if attempts < 3 {
                Err(NetworkError::Server {
                    status: 503,
                    message: "Service Unavailable".to_string(),
                }
                .into())
            } else {
                Ok(attempts)
            };
            async move { outcome }
        })
        .await
        .unwrap();

        assert_eq!(result, 3);
        assert_eq!(attempts, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_errors_are_not_retried() {
        let policy = quick_policy();
        let mut attempts = 0u32;
        let result: Result<()> = execute_with_retry(&policy, || {
            attempts += 1;
            let err = Err(NetworkError::InvalidUrl("bad".to_string()).into());
            async move { err }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_reraises_last_error() {
        let policy = quick_policy();
        let mut attempts = 0u32;
        let result: Result<()> = execute_with_retry(&policy, || {
            attempts += 1;
            let err = Err(NetworkError::Server {
                status: 500,
                message: "Internal Server Error".to_string(),
            }
            .into());
            async move { err }
        })
        .await;

        assert!(matches!(
            result,
            Err(Error::Network(NetworkError::Server { status: 500, .. }))
        ));
        // Initial attempt plus max_retries
        assert_eq!(attempts, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_wait_honors_server_delay() {
        let policy = quick_policy();
        let start = tokio::time::Instant::now();
        let mut attempts = 0u32;
        let result = execute_with_retry(&policy, || {
            attempts += 1;
            let outcome = if attempts == 1 {
                Err(NetworkError::RateLimited {
                    retry_after: Some(5),
                }
                .into())
            } else {
                Ok(())
            };
            async move { outcome }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }
}
