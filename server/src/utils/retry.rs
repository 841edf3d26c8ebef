//! Async retry utilities with exponential backoff

use std::time::Duration;

/// Default maximum retry attempts for upstream API calls
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay in milliseconds for exponential backoff
pub const DEFAULT_BASE_DELAY_MS: u64 = 250;

/// Retry an async operation with exponential backoff.
///
/// `should_retry` classifies errors; a non-retryable error is returned
/// immediately. The final error is returned once `max_attempts` is
/// exhausted.
pub async fn retry_with_backoff<F, Fut, T, E>(
    max_attempts: u32,
    base_delay_ms: u64,
    should_retry: impl Fn(&E) -> bool,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempts >= max_attempts || !should_retry(&e) {
                    return Err(e);
                }
                let delay = Duration::from_millis(base_delay_ms * 2_u64.pow(attempts - 1));
                tracing::warn!(
                    error = %e,
                    attempt = attempts,
                    delay_ms = delay.as_millis(),
                    "Retrying after transient error"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[tokio::test]
    async fn test_success_on_first_try() {
        let result = retry_with_backoff(3, 1, |_: &&str| true, || async { Ok::<_, &str>(42) }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn test_success_after_retry() {
        let attempts = RefCell::new(0);
        let result = retry_with_backoff(3, 1, |_: &&str| true, || {
            *attempts.borrow_mut() += 1;
            let n = *attempts.borrow();
            async move {
                if n < 2 { Err("transient error") } else { Ok(n) }
            }
        })
        .await;
        assert_eq!(result, Ok(2));
    }

    #[tokio::test]
    async fn test_failure_after_max_attempts() {
        let result =
            retry_with_backoff(3, 1, |_: &&str| true, || async { Err::<(), _>("persistent") })
                .await;
        assert_eq!(result, Err("persistent"));
    }

    #[tokio::test]
    async fn test_non_retryable_error_returns_immediately() {
        let attempts = RefCell::new(0);
        let result = retry_with_backoff(5, 1, |_: &&str| false, || {
            *attempts.borrow_mut() += 1;
            async { Err::<(), _>("fatal") }
        })
        .await;
        assert_eq!(result, Err("fatal"));
        assert_eq!(*attempts.borrow(), 1);
    }
}
