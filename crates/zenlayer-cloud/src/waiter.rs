//! Pull-based state poller
//!
//! A [`StateRefreshFunc`] fetches the entity once and reports its status;
//! [`StateChangeConf`] drives it until the status reaches a target.

use crate::context::OpContext;
use crate::error::{CloudError, Result};
use crate::retry::{RetryError, classify};
use futures_util::future::BoxFuture;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// `Ok(None)` means the entity is gone
pub type RefreshResult<T> = Result<Option<(T, String)>>;

pub type StateRefreshFunc<'a, T> = Box<dyn FnMut() -> BoxFuture<'a, RefreshResult<T>> + Send + 'a>;

const INITIAL_INTERVAL: Duration = Duration::from_millis(100);
const MAX_INTERVAL: Duration = Duration::from_secs(10);

/// Build a refresh function from a by-id lookup.
///
/// A status in `failed` becomes [`CloudError::FailedState`].
pub fn state_refresh<'a, T, F, Fut>(
    label: impl Into<String>,
    mut fetch: F,
    status: fn(&T) -> String,
    failed: &'static [&'static str],
) -> StateRefreshFunc<'a, T>
where
    T: Send + 'a,
    F: FnMut() -> Fut + Send + 'a,
    Fut: Future<Output = Result<Option<T>>> + Send + 'a,
{
    let label = label.into();
    Box::new(move || {
        let fut = fetch();
        let label = label.clone();
        Box::pin(async move {
            let Some(entity) = fut.await? else {
                return Ok(None);
            };
            let state = status(&entity);
            if failed.contains(&state.as_str()) {
                return Err(CloudError::FailedState {
                    resource: label,
                    state,
                });
            }
            Ok(Some((entity, state)))
        })
    })
}

/// Wait configuration for one transition
pub struct StateChangeConf<'a, T> {
    pub label: String,
    pub pending: &'static [&'static str],
    /// Empty target means "wait until gone"
    pub target: &'static [&'static str],
    pub refresh: StateRefreshFunc<'a, T>,
    pub timeout: Duration,
    /// Initial wait before the first refresh
    pub delay: Duration,
    /// Lower bound for the interval between refreshes
    pub min_interval: Duration,
    /// Consecutive not-found results tolerated before failing
    pub not_found_checks: u32,
    /// Treat disappearance as success even with a non-empty target
    pub accept_gone: bool,
}

impl<'a, T> StateChangeConf<'a, T> {
    pub fn new(
        label: impl Into<String>,
        pending: &'static [&'static str],
        target: &'static [&'static str],
        refresh: StateRefreshFunc<'a, T>,
        timeout: Duration,
    ) -> Self {
        Self {
            label: label.into(),
            pending,
            target,
            refresh,
            timeout,
            delay: Duration::from_secs(1),
            min_interval: Duration::from_secs(3),
            not_found_checks: 20,
            accept_gone: false,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    pub fn not_found_checks(mut self, checks: u32) -> Self {
        self.not_found_checks = checks;
        self
    }

    pub fn accept_gone(mut self) -> Self {
        self.accept_gone = true;
        self
    }

    /// Poll until a target status, returning the last entity seen there.
    ///
    /// Returns `Ok(None)` when the entity disappeared and that counts as
    /// success (empty target or `accept_gone`).
    pub async fn wait(mut self, ctx: &OpContext) -> Result<Option<T>> {
        let deadline = (Instant::now() + self.timeout).min(ctx.deadline());
        let mut interval = INITIAL_INTERVAL;
        let mut not_found = 0u32;
        let mut transient = 0u32;
        let mut last_state = String::new();

        tracing::info!(target_states = ?self.target, "waiting for {}", self.label);
        ctx.sleep(self.delay.min(deadline.saturating_duration_since(Instant::now())))
            .await?;

        loop {
            if Instant::now() >= deadline {
                return Err(CloudError::Timeout(format!(
                    "{} still {:?} after {:?}, expected {:?}",
                    self.label, last_state, self.timeout, self.target
                )));
            }

            match (self.refresh)().await {
                Err(err) => match classify(err, &[]) {
                    RetryError::NonRetryable(e) => return Err(e),
                    RetryError::RetryableCapped(e) => {
                        transient += 1;
                        if transient >= ctx.retry_config().max_attempts {
                            return Err(e);
                        }
                        tracing::debug!("refresh of {} failed: {}", self.label, e);
                    }
                    RetryError::Retryable(e) => {
                        tracing::debug!("refresh of {} failed: {}", self.label, e);
                    }
                },
                Ok(None) => {
                    if self.target.is_empty() || self.accept_gone {
                        return Ok(None);
                    }
                    not_found += 1;
                    if not_found > self.not_found_checks {
                        return Err(CloudError::NotFound(format!(
                            "{} (gave up after {} checks)",
                            self.label, self.not_found_checks
                        )));
                    }
                }
                Ok(Some((entity, state))) => {
                    not_found = 0;
                    if self.target.contains(&state.as_str()) {
                        return Ok(Some(entity));
                    }
                    if !self.pending.contains(&state.as_str()) {
                        return Err(CloudError::UnexpectedState {
                            resource: self.label,
                            state,
                            expected: self.target.iter().map(|s| s.to_string()).collect(),
                        });
                    }
                    if state != last_state {
                        tracing::debug!("{} is {}", self.label, state);
                    }
                    last_state = state;
                }
            }

            interval = (interval * 2).min(MAX_INTERVAL).max(self.min_interval);
            let left = deadline.saturating_duration_since(Instant::now());
            ctx.sleep(interval.min(left)).await?;
        }
    }
}

/// Keep refreshing while the status is transient.
///
/// Used by Read: returns the first snapshot outside `pending`, or `None`
/// when the entity is gone. Bounded by the context loop timeout.
pub async fn wait_settled<'a, T>(
    ctx: &OpContext,
    label: &str,
    pending: &[&str],
    mut refresh: StateRefreshFunc<'a, T>,
) -> Result<Option<T>> {
    let deadline = Instant::now() + ctx.loop_timeout();
    let mut interval = Duration::from_secs(1);

    loop {
        match refresh().await {
            Ok(None) => return Ok(None),
            Ok(Some((entity, state))) => {
                if !pending.contains(&state.as_str()) {
                    return Ok(Some(entity));
                }
                tracing::debug!("{} is {}, waiting for it to settle", label, state);
            }
            Err(err) => match classify(err, &[]) {
                RetryError::Retryable(e) => {
                    tracing::debug!("refresh of {} failed: {}", label, e);
                }
                other => return Err(other.into_inner()),
            },
        }

        if Instant::now() + interval >= deadline {
            return Err(CloudError::Timeout(format!(
                "{} did not leave a transient state",
                label
            )));
        }
        ctx.sleep(interval).await?;
        interval = (interval * 2).min(MAX_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Operation;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio_util::sync::CancellationToken;
    use zenlayer_sdk::SdkError;

    #[derive(Debug, Clone, PartialEq)]
    struct Disk {
        status: String,
    }

    /// Hands out scripted lookups, repeating the last one
    struct Script(Mutex<VecDeque<Option<&'static str>>>);

    impl Script {
        fn new(states: &[Option<&'static str>]) -> Self {
            Self(Mutex::new(states.iter().copied().collect()))
        }

        async fn next(&self) -> Result<Option<Disk>> {
            let mut queue = self.0.lock().unwrap();
            let state = if queue.len() > 1 {
                queue.pop_front().flatten()
            } else {
                queue.front().copied().flatten()
            };
            Ok(state.map(|s| Disk { status: s.to_string() }))
        }
    }

    fn ctx() -> OpContext {
        OpContext::new(
            Operation::Create,
            Duration::from_secs(600),
            CancellationToken::new(),
        )
    }

    fn refresh<'a>(script: &'a Script, failed: &'static [&'static str]) -> StateRefreshFunc<'a, Disk> {
        state_refresh("disk d-1", move || script.next(), |d: &Disk| d.status.clone(), failed)
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_reaches_target() {
        let script = Script::new(&[Some("CREATING"), Some("CREATING"), Some("AVAILABLE")]);
        let ctx = ctx();

        let disk = StateChangeConf::new(
            "disk d-1",
            &["CREATING"],
            &["AVAILABLE"],
            refresh(&script, &["FAILED"]),
            Duration::from_secs(300),
        )
        .wait(&ctx)
        .await
        .unwrap();

        assert_eq!(disk.unwrap().status, "AVAILABLE");
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_fails_on_failed_state() {
        let script = Script::new(&[Some("CREATING"), Some("FAILED")]);
        let ctx = ctx();

        let err = StateChangeConf::new(
            "disk d-1",
            &["CREATING"],
            &["AVAILABLE"],
            refresh(&script, &["FAILED"]),
            Duration::from_secs(300),
        )
        .wait(&ctx)
        .await
        .unwrap_err();

        assert!(matches!(err, CloudError::FailedState { state, .. } if state == "FAILED"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_rejects_unexpected_state() {
        let script = Script::new(&[Some("IN_USE")]);
        let ctx = ctx();

        let err = StateChangeConf::new(
            "disk d-1",
            &["CREATING"],
            &["AVAILABLE"],
            refresh(&script, &[]),
            Duration::from_secs(300),
        )
        .wait(&ctx)
        .await
        .unwrap_err();

        assert!(matches!(err, CloudError::UnexpectedState { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_gone() {
        let script = Script::new(&[Some("DELETING"), None]);
        let ctx = ctx();

        let gone = StateChangeConf::new(
            "disk d-1",
            &["DELETING"],
            &[],
            refresh(&script, &[]),
            Duration::from_secs(300),
        )
        .wait(&ctx)
        .await
        .unwrap();

        assert!(gone.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_not_found_threshold() {
        let script = Script::new(&[None]);
        let ctx = ctx();

        let err = StateChangeConf::new(
            "disk d-1",
            &["CREATING"],
            &["AVAILABLE"],
            refresh(&script, &[]),
            Duration::from_secs(3600),
        )
        .not_found_checks(2)
        .wait(&ctx)
        .await
        .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out() {
        let script = Script::new(&[Some("CREATING")]);
        let ctx = ctx();

        let err = StateChangeConf::new(
            "disk d-1",
            &["CREATING"],
            &["AVAILABLE"],
            refresh(&script, &[]),
            Duration::from_secs(30),
        )
        .wait(&ctx)
        .await
        .unwrap_err();

        assert!(matches!(err, CloudError::Timeout(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_settled_skips_transient_states() {
        let script = Script::new(&[Some("ATTACHING"), Some("IN_USE")]);
        let ctx = ctx();

        let disk = wait_settled(&ctx, "disk d-1", &["ATTACHING"], refresh(&script, &[]))
            .await
            .unwrap();
        assert_eq!(disk.unwrap().status, "IN_USE");
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_settled_propagates_terminal_errors() {
        let ctx = ctx();
        let refresh: StateRefreshFunc<'_, Disk> = state_refresh(
            "disk d-1",
            || async { Err(SdkError::api("INVALID_PARAMETER", "bad").into()) },
            |d: &Disk| d.status.clone(),
            &[],
        );

        let err = wait_settled(&ctx, "disk d-1", &[], refresh).await.unwrap_err();
        assert_eq!(err.code(), Some("INVALID_PARAMETER"));
    }
}
