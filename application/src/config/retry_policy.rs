//! Caller-side retry policy.
//!
//! The pipeline never retries on its own. A caller that wants retries wraps
//! its call in [`RetryPolicy::run`], which repeats only failures whose
//! [`FlowError::is_retryable`] is true (model unavailable) and returns every
//! other outcome immediately.

use crate::use_cases::execute_flow::FlowError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one (at least 1).
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl RetryPolicy {
    /// A single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    /// `retries` additional attempts after the first, `backoff` apart
    pub fn with_retries(retries: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
            backoff,
        }
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempts are used up. The last error is returned.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, FlowError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FlowError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op().await {
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    warn!(
                        "Attempt {}/{} failed: {}; retrying in {:?}",
                        attempt, max_attempts, e, self.backoff
                    );
                    attempt += 1;
                    if !self.backoff.is_zero() {
                        tokio::time::sleep(self.backoff).await;
                    }
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::model_invoker::ModelError;
    use scholar_domain::{ParseError, ResponseError};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn unavailable() -> FlowError {
        FlowError::ModelUnavailable {
            flow: "ask_question".to_string(),
            source: ModelError::EmptyOutput,
        }
    }

    fn malformed() -> FlowError {
        FlowError::MalformedResponse {
            flow: "ask_question".to_string(),
            source: ResponseError::Unparsable(ParseError::Empty),
        }
    }

    #[tokio::test]
    async fn test_none_runs_once() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = RetryPolicy::none()
            .run(|| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(unavailable())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_unavailable_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = RetryPolicy::with_retries(3, Duration::from_millis(1))
            .run(|| async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 { Err(unavailable()) } else { Ok(n) }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = RetryPolicy::with_retries(2, Duration::ZERO)
            .run(|| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(unavailable())
            })
            .await;

        assert!(matches!(result, Err(FlowError::ModelUnavailable { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_malformed_response_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = RetryPolicy::with_retries(5, Duration::ZERO)
            .run(|| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(malformed())
            })
            .await;

        assert!(matches!(result, Err(FlowError::MalformedResponse { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
