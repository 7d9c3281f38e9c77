//! Error classification and deadline-bounded retry

use crate::context::OpContext;
use crate::error::{CloudError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use zenlayer_sdk::SdkError;

/// Remote codes that are always worth another attempt
pub const RETRYABLE_CODES: &[&str] = &[
    "InternalServerError",
    "ReadTimedOut",
    "NetworkError",
    "OperationTimeout",
];

/// Retry decision for one failed attempt
#[derive(Debug)]
pub enum RetryError {
    /// Transient; retry until the deadline
    Retryable(CloudError),
    /// Cause unknown; retry at most `RetryConfig::max_attempts` times
    RetryableCapped(CloudError),
    /// Terminal
    NonRetryable(CloudError),
}

impl RetryError {
    pub fn into_inner(self) -> CloudError {
        match self {
            RetryError::Retryable(e) | RetryError::RetryableCapped(e) | RetryError::NonRetryable(e) => e,
        }
    }
}

/// Map an error to a retry decision.
///
/// `extra_codes` extends [`RETRYABLE_CODES`] for a single call site, e.g.
/// a resource that is briefly locked by a previous operation.
pub fn classify(err: CloudError, extra_codes: &[&str]) -> RetryError {
    match &err {
        CloudError::Sdk(sdk) => match sdk {
            SdkError::Network(_) | SdkError::Timeout(_) => RetryError::Retryable(err),
            SdkError::Http { status, .. } if *status >= 500 => RetryError::Retryable(err),
            SdkError::Http { .. } | SdkError::Decode { .. } => RetryError::RetryableCapped(err),
            SdkError::Api { code, .. } => {
                if RETRYABLE_CODES.contains(&code.as_str()) || extra_codes.contains(&code.as_str()) {
                    RetryError::Retryable(err)
                } else {
                    RetryError::NonRetryable(err)
                }
            }
            SdkError::Credential(_) => RetryError::NonRetryable(err),
        },
        CloudError::Timeout(_) => RetryError::Retryable(err),
        CloudError::Io(_) => RetryError::RetryableCapped(err),
        _ => RetryError::NonRetryable(err),
    }
}

/// Run `op` until it succeeds, fails terminally, or `timeout` elapses.
///
/// The effective deadline is the earlier of `timeout` and the context
/// deadline. Sleeps follow the context's [`RetryConfig`](crate::RetryConfig)
/// backoff and abort on cancellation.
pub async fn retry<T, F, Fut>(ctx: &OpContext, timeout: Duration, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, RetryError>>,
{
    let deadline = (Instant::now() + timeout).min(ctx.deadline());
    let config = ctx.retry_config();
    let mut attempt: u32 = 0;
    let mut capped: u32 = 0;

    loop {
        ctx.check_cancelled()?;

        let err = match op().await {
            Ok(value) => return Ok(value),
            Err(RetryError::NonRetryable(e)) => return Err(e),
            Err(RetryError::RetryableCapped(e)) => {
                capped += 1;
                if capped >= config.max_attempts {
                    tracing::warn!(attempts = capped, "giving up after repeated unknown errors: {}", e);
                    return Err(e);
                }
                e
            }
            Err(RetryError::Retryable(e)) => e,
        };

        let delay = config.delay_for_attempt(attempt);
        let now = Instant::now();
        if now + delay >= deadline {
            return Err(CloudError::Timeout(format!(
                "{} did not succeed within {:?}: {}",
                ctx.operation(),
                timeout,
                err
            )));
        }

        tracing::debug!(attempt, ?delay, "retrying after error: {}", err);
        ctx.sleep(delay).await?;
        attempt += 1;
    }
}

/// [`retry`] over a call returning [`CloudError`], classified with
/// [`classify`] and bounded by the context's loop timeout.
pub async fn retry_api<T, F, Fut>(ctx: &OpContext, extra_codes: &[&str], mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    retry(ctx, ctx.loop_timeout(), || {
        let fut = op();
        async move { fut.await.map_err(|e| classify(e, extra_codes)) }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Operation;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio_util::sync::CancellationToken;

    fn ctx(timeout_secs: u64) -> OpContext {
        OpContext::new(
            Operation::Create,
            Duration::from_secs(timeout_secs),
            CancellationToken::new(),
        )
    }

    #[test]
    fn test_classify() {
        let retryable = |e: SdkError| matches!(classify(e.into(), &[]), RetryError::Retryable(_));

        assert!(retryable(SdkError::Network("reset".into())));
        assert!(retryable(SdkError::Timeout("slow".into())));
        assert!(retryable(SdkError::Http {
            status: 502,
            body: String::new()
        }));
        assert!(retryable(SdkError::api("OperationTimeout", "")));
        assert!(!retryable(SdkError::api("INVALID_PARAMETER", "")));

        assert!(matches!(
            classify(SdkError::api("OPERATION_DENIED_DISK_BUSY", "").into(), &["OPERATION_DENIED_DISK_BUSY"]),
            RetryError::Retryable(_)
        ));
        assert!(matches!(
            classify(
                SdkError::Http {
                    status: 404,
                    body: "<html>".into()
                }
                .into(),
                &[]
            ),
            RetryError::RetryableCapped(_)
        ));
        assert!(matches!(
            classify(CloudError::validation("bad"), &[]),
            RetryError::NonRetryable(_)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_until_success() {
        let calls = AtomicU32::new(0);
        let ctx = ctx(600);

        let value = retry_api(&ctx, &[], || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(SdkError::Network("reset".into()).into())
            } else {
                Ok(42)
            }
        })
        .await
        .unwrap();

        assert_eq!(value, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let ctx = ctx(600);

        let err = retry_api(&ctx, &[], || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(SdkError::api("INVALID_PARAMETER", "nope").into())
        })
        .await
        .unwrap_err();

        assert_eq!(err.code(), Some("INVALID_PARAMETER"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_errors_are_capped() {
        let calls = AtomicU32::new(0);
        let ctx = ctx(600);

        let err = retry_api(&ctx, &[], || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(
                SdkError::Decode {
                    action: "DescribeVpcs".into(),
                    message: "eof".into(),
                }
                .into(),
            )
        })
        .await
        .unwrap_err();

        assert!(matches!(err, CloudError::Sdk(SdkError::Decode { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_errors_time_out() {
        let ctx = ctx(10);

        let err = retry_api(&ctx, &[], || async {
            Err::<(), _>(SdkError::Network("down".into()).into())
        })
        .await
        .unwrap_err();

        assert!(matches!(err, CloudError::Timeout(_)));
    }
}
