use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{ClientError, ClientResult};

/// Bounded exponential backoff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub retries: u32,
    pub base_delay: Duration,
    /// Per-attempt limit.
    pub timeout: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based): base, 2x base, 4x base...
    pub fn delay(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(retry.min(16)))
    }
}

/// Run `attempt` until it succeeds, fails with a non-retryable error, or the
/// retries are used up. Each attempt is bounded by the policy's timeout.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, op: &str, mut attempt: F) -> ClientResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<T>>,
{
    let mut retry = 0;
    loop {
        let result = match tokio::time::timeout(policy.timeout, attempt()).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(policy.timeout)),
        };
        match result {
            Err(err) if err.is_retryable() && retry < policy.retries => {
                let delay = policy.delay(retry);
                warn!(op, retry = retry + 1, ?delay, "request failed, retrying: {err}");
                tokio::time::sleep(delay).await;
                retry += 1;
            }
            other => return other,
        }
    }
}
