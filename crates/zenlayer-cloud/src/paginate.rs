//! Bounded-parallel pagination over describe actions

use crate::context::OpContext;
use crate::error::Result;
use crate::retry::retry_api;
use futures_util::StreamExt;
use futures_util::stream;
use zenlayer_sdk::{ApiClient, PagedRequest, PagedResponse};

pub const PAGE_SIZE: i64 = 100;
pub const MAX_CONCURRENCY: usize = 50;

type Item<R> = <<R as zenlayer_sdk::Request>::Response as PagedResponse>::Item;

/// Fetch every page of a describe request.
///
/// The first page is fetched alone to learn `totalCount`; the rest run up
/// to [`MAX_CONCURRENCY`] at a time. Items keep API order. A failing page
/// does not stop its peers, but the first failure is returned once all
/// pages have finished.
pub async fn describe_all<R>(ctx: &OpContext, client: &ApiClient, mut request: R) -> Result<Vec<Item<R>>>
where
    R: PagedRequest,
{
    request.set_page(1, PAGE_SIZE);
    let first = retry_api(ctx, &[], || async { Ok(client.send(&request).await?) }).await?;

    let total = first.total_count();
    let mut items = first.into_items();
    if total <= PAGE_SIZE {
        return Ok(items);
    }

    let pages = (total + PAGE_SIZE - 1) / PAGE_SIZE;
    tracing::debug!(action = R::ACTION, total, pages, "fetching remaining pages");

    let results: Vec<Result<Vec<Item<R>>>> = stream::iter(2..=pages)
        .map(|page| {
            let mut request = request.clone();
            request.set_page(page, PAGE_SIZE);
            async move {
                retry_api(ctx, &[], || async { Ok(client.send(&request).await?) })
                    .await
                    .map(PagedResponse::into_items)
                    .inspect_err(|e| {
                        tracing::warn!(action = R::ACTION, page, "page fetch failed: {}", e);
                    })
            }
        })
        .buffered(MAX_CONCURRENCY)
        .collect()
        .await;

    for page in results {
        items.extend(page?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Operation;
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;
    use zenlayer_sdk::{ApiRequest, SdkError, Transport};

    #[derive(Debug, Clone, Default, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct ListThings {
        page_num: Option<i64>,
        page_size: Option<i64>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    struct ListThingsResponse {
        total_count: i64,
        data_set: Vec<String>,
    }

    zenlayer_sdk::request!(ListThings => ListThingsResponse, "ListThings");
    zenlayer_sdk::paged!(ListThings => ListThingsResponse, String);

    /// Serves `total` numbered items, optionally failing one page
    struct Pager {
        total: i64,
        failing_page: Option<i64>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for Pager {
        async fn call(&self, request: ApiRequest) -> zenlayer_sdk::Result<serde_json::Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let page = request.body["pageNum"].as_i64().unwrap_or(1);
            let size = request.body["pageSize"].as_i64().unwrap_or(PAGE_SIZE);
            if Some(page) == self.failing_page {
                return Err(SdkError::api("INVALID_PARAMETER", "page out of range"));
            }
            // later pages answer first
            tokio::time::sleep(Duration::from_millis((100 - page as u64 % 100) * 10)).await;
            let start = (page - 1) * size;
            let end = (start + size).min(self.total);
            let items: Vec<String> = (start..end).map(|i| format!("item-{i}")).collect();
            Ok(serde_json::json!({"totalCount": self.total, "dataSet": items}))
        }
    }

    fn client(total: i64, failing_page: Option<i64>) -> (Arc<Pager>, ApiClient) {
        let pager = Arc::new(Pager {
            total,
            failing_page,
            calls: AtomicUsize::new(0),
        });
        (pager.clone(), ApiClient::new(pager, "zec", "2024-04-01"))
    }

    fn ctx() -> OpContext {
        OpContext::new(Operation::Read, Duration::from_secs(600), CancellationToken::new())
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_page_returns_early() {
        let (pager, client) = client(42, None);
        let items = describe_all(&ctx(), &client, ListThings::default()).await.unwrap();
        assert_eq!(items.len(), 42);
        assert_eq!(pager.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_pages_in_order() {
        let (pager, client) = client(1234, None);
        let items = describe_all(&ctx(), &client, ListThings::default()).await.unwrap();

        assert_eq!(items.len(), 1234);
        assert_eq!(pager.calls.load(Ordering::SeqCst), 13);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item, &format!("item-{i}"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_page_fails_listing() {
        let (pager, client) = client(450, Some(3));
        let err = describe_all(&ctx(), &client, ListThings::default()).await.unwrap_err();

        assert_eq!(err.code(), Some("INVALID_PARAMETER"));
        // peers still ran
        assert_eq!(pager.calls.load(Ordering::SeqCst), 5);
    }
}
