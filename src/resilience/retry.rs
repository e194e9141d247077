//! Bounded retry execution for remote calls.
//!
//! The policy is an explicit value passed to the executor, not a property of
//! the wrapped function. Mutating calls wrapped here must either be idempotent
//! or check on-chain state before resubmitting; the pipeline steps do the
//! latter (see `pipeline::mint` and `pipeline::runner`).

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::resilience::backoff::backoff_delay;

/// Retry budget and backoff parameters for one class of remote call.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 100,
            max_delay_ms: 2_000,
        }
    }
}

/// Run `op` until it succeeds or the policy's attempt budget is exhausted.
///
/// On exhaustion the final error is returned unchanged. No distinction is
/// made between transient and permanent failures.
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, op_name: &str, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < policy.max_attempts => {
                tracing::warn!(
                    op = op_name,
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %error,
                    "attempt failed, retrying"
                );
                tokio::time::sleep(backoff_delay(
                    attempt,
                    policy.base_delay_ms,
                    policy.max_delay_ms,
                ))
                .await;
                attempt += 1;
            }
            Err(error) => {
                tracing::error!(
                    op = op_name,
                    attempts = attempt,
                    error = %error,
                    "retry budget exhausted"
                );
                return Err(error);
            }
        }
    }
}
