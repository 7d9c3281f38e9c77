//! Service layer
//!
//! One aggregator per product family. Each exposes by-id lookups that map
//! "not found" to `None`, paginated by-filter listings, modify/delete calls,
//! and state-refresh functions for the poller. Every remote call runs inside
//! the classifier-driven retry loop.

pub mod traffic;
pub mod user;
pub mod zec;

pub use traffic::TrafficService;
pub use user::UserService;
pub use zec::ZecService;

use zenlayer_cloud::{OpContext, Result, retry_api};
use zenlayer_sdk::{ApiClient, Request};

/// Send one request under the retry loop
pub(crate) async fn call<R: Request>(
    client: &ApiClient,
    ctx: &OpContext,
    request: &R,
    extra_codes: &[&str],
) -> Result<R::Response> {
    tracing::debug!(service = client.service(), action = R::ACTION, "calling");
    retry_api(ctx, extra_codes, || async move { Ok(client.send(request).await?) }).await
}

/// Turn a "resource gone" error into `None`
pub(crate) fn found<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// `None` for empty strings, so unset filter fields stay off the wire
pub(crate) fn opt(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

pub(crate) fn opt_vec(v: &[String]) -> Option<Vec<String>> {
    (!v.is_empty()).then(|| v.to_vec())
}
