// SPDX-License-Identifier: MIT

//! Exponential backoff for idempotent backend reads.

use crate::error::AppError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Retry configuration with exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first.
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 30_000,
            backoff_factor: 2.0,
        }
    }
}

impl RetryConfig {
    /// Run `func` until it succeeds, fails with a non-transient error, or
    /// the attempt budget is spent.
    pub async fn execute<F, Fut, T>(&self, mut func: F) -> Result<T, AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let mut attempt = 0;
        let mut delay_ms = self.initial_delay_ms;

        loop {
            match func().await {
                Ok(result) => return Ok(result),
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) => {
                    attempt += 1;

                    if attempt >= self.max_retries {
                        tracing::warn!(attempts = attempt, error = %e, "Backend retries exhausted");
                        return Err(e);
                    }

                    tracing::debug!(attempt, delay_ms, error = %e, "Backend request failed, retrying");

                    sleep(Duration::from_millis(delay_ms)).await;

                    delay_ms =
                        ((delay_ms as f64 * self.backoff_factor) as u64).min(self.max_delay_ms);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            initial_delay_ms: 1,
            max_delay_ms: 5,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_success_after_transient_failures() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = fast(3)
            .execute(|| {
                let attempts = attempts_clone.clone();
                async move {
                    let count = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    if count < 3 {
                        Err(AppError::Backend("HTTP 503".to_string()))
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = fast(2)
            .execute(|| {
                let attempts = attempts_clone.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err::<i32, _>(AppError::Backend("down".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(AppError::Backend(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_client_errors_not_retried() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = fast(5)
            .execute(|| {
                let attempts = attempts_clone.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err::<i32, _>(AppError::NotFound("marathon".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
