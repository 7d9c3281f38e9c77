//! Per-operation context: deadline, cancellation and retry tuning

use crate::error::{CloudError, Result};
use crate::provider::RetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Margin kept between internal loops and the host deadline
pub const SAFETY_MARGIN: Duration = Duration::from_secs(60);

/// Host-facing entry point being served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
    Plan,
    Validate,
    ReadDataSource,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Read => write!(f, "read"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
            Operation::Import => write!(f, "import"),
            Operation::Plan => write!(f, "plan"),
            Operation::Validate => write!(f, "validate"),
            Operation::ReadDataSource => write!(f, "read data source"),
        }
    }
}

/// Context handed to every handler call
///
/// Cheap to share by reference; it owns no remote state.
#[derive(Debug, Clone)]
pub struct OpContext {
    operation: Operation,
    deadline: Instant,
    cancel: CancellationToken,
    retry: RetryConfig,
}

impl OpContext {
    pub fn new(operation: Operation, timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            operation,
            deadline: Instant::now() + timeout,
            cancel,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the host deadline
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Budget for an internal retry or poll loop.
    ///
    /// One minute is held back so the handler can still report; when less
    /// than that is left the whole remainder is used.
    pub fn loop_timeout(&self) -> Duration {
        let remaining = self.remaining();
        if remaining > SAFETY_MARGIN {
            remaining - SAFETY_MARGIN
        } else {
            remaining
        }
    }

    pub fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(CloudError::Cancelled(self.operation.to_string()));
        }
        Ok(())
    }

    /// Sleep unless cancelled first
    pub async fn sleep(&self, duration: Duration) -> Result<()> {
        tokio::select! {
            _ = self.cancel.cancelled() => Err(CloudError::Cancelled(self.operation.to_string())),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_loop_timeout_keeps_margin() {
        let ctx = OpContext::new(
            Operation::Create,
            Duration::from_secs(600),
            CancellationToken::new(),
        );
        assert_eq!(ctx.loop_timeout(), Duration::from_secs(540));

        let short = OpContext::new(
            Operation::Read,
            Duration::from_secs(30),
            CancellationToken::new(),
        );
        assert_eq!(short.loop_timeout(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_aborts_on_cancel() {
        let token = CancellationToken::new();
        let ctx = OpContext::new(Operation::Delete, Duration::from_secs(600), token.clone());
        token.cancel();

        let err = tokio_test::assert_err!(ctx.sleep(Duration::from_secs(5)).await);
        assert!(matches!(err, CloudError::Cancelled(_)));
        tokio_test::assert_err!(ctx.check_cancelled());
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "create");
        assert_eq!(Operation::ReadDataSource.to_string(), "read data source");
    }
}
