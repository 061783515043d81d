use backon::{ExponentialBuilder, Retryable};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use super::operation::Operation;
use super::transport::Transport;
use crate::config::GithubConfig;
use crate::error::{GithubError, IsRetryable};

/// Runs operations through a [`Transport`], retrying throttle signals with exponential backoff.
///
/// Every attempt first passes the transport's quota gate, so a quota reported during a retry is
/// honoured before the next send. Failures other than [`GithubError::Throttled`] surface at once.
pub struct RetryingExecutor<T> {
    transport: T,
    backoff: ExponentialBuilder,
    max_attempts: usize,
}

impl<T: Transport> RetryingExecutor<T> {
    pub fn new(transport: T, cfg: &GithubConfig) -> Self {
        Self::with_policy(
            transport,
            cfg.max_attempts,
            cfg.retry_base_delay(),
            cfg.retry_factor,
        )
    }

    /// `max_attempts` counts the first call. Delay before retry `n` is `base_delay * factor^(n-1)`.
    pub fn with_policy(
        transport: T,
        max_attempts: usize,
        base_delay: Duration,
        factor: f32,
    ) -> Self {
        let max_attempts = max_attempts.max(1);
        let backoff = ExponentialBuilder::default()
            .with_min_delay(base_delay)
            .with_factor(factor)
            .without_max_delay()
            .with_max_times(max_attempts - 1);

        Self {
            transport,
            backoff,
            max_attempts,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub async fn execute(&self, operation: &Operation) -> Result<Value, GithubError> {
        let attempts = AtomicUsize::new(0);
        let transport = &self.transport;
        let counter = &attempts;

        let op = move || async move {
            let attempt = counter.fetch_add(1, Ordering::Relaxed) + 1;
            transport.wait_if_throttled().await;
            debug!(operation = %operation.kind(), attempt, "Sending GraphQL operation");
            transport.send(operation).await
        };

        let result = op
            .retry(self.backoff)
            .sleep(tokio::time::sleep)
            .when(|err: &GithubError| err.is_retryable())
            .notify(|err: &GithubError, dur: Duration| {
                warn!(
                    operation = %operation.kind(),
                    backoff_secs = dur.as_secs(),
                    "Upstream throttled ({err}), retrying after backoff"
                );
            })
            .await;

        result.map_err(|err| {
            if err.is_retryable() {
                let attempts = attempts.load(Ordering::Relaxed);
                warn!(
                    operation = %operation.kind(),
                    attempts,
                    "Giving up after repeated throttling"
                );
                GithubError::ExhaustedRetries {
                    attempts,
                    source: Box::new(err),
                }
            } else {
                err
            }
        })
    }
}
