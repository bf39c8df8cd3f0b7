//! Caller-side retry decorator.
//!
//! Retry policy stays out of the pipeline core — a second attempt is a
//! second billable model call, so the caller composes this around
//! `generate()` when it wants one. Only transient upstream failures
//! (timeout, network, provider 5xx) are retried; validation errors,
//! provider 4xx, and cancellation return immediately.

use crate::error::GenerateError;
use std::future::Future;
use std::time::Duration;

/// Run `op` up to `max_attempts` times with exponential backoff
/// (`base_delay`, doubled per attempt).
pub async fn with_retry<T, F, Fut>(
    max_attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, GenerateError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GenerateError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && err.is_retryable() => {
                let delay = base_delay * 2u32.saturating_pow(attempt - 1);
                log::warn!(
                    "[RETRY] Attempt {}/{} failed: {} — retrying in {:?}",
                    attempt,
                    max_attempts,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{UpstreamError, UpstreamKind};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn timeout_err() -> GenerateError {
        UpstreamError::new(UpstreamKind::Timeout, "deadline exceeded").into()
    }

    #[tokio::test]
    async fn retries_transient_failures_until_success() {
        let calls = AtomicU32::new(0);
        let result = with_retry(3, Duration::ZERO, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(timeout_err())
                } else {
                    Ok("done")
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(2, Duration::ZERO, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(timeout_err()) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn provider_4xx_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(3, Duration::ZERO, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(UpstreamError::new(UpstreamKind::Api(401), "bad key").into()) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn validation_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(3, Duration::ZERO, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(GenerateError::missing("image")) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancellation_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(3, Duration::ZERO, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(GenerateError::Cancelled) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
