//! Typed API client
//!
//! Every action is a request struct implementing [`Request`]; its response
//! type is fixed by the trait. `null` values are stripped from both the
//! outgoing body (so unset optional fields are omitted) and the incoming
//! payload (so absent fields decode as the type's zero value).

use crate::error::{Result, SdkError};
use crate::transport::{ApiRequest, Transport};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single remote action
pub trait Request: Serialize + Send + Sync {
    /// Action name sent as `X-ZC-Action`, also used for logging
    const ACTION: &'static str;

    type Response: DeserializeOwned + Send;

    fn action(&self) -> &'static str {
        Self::ACTION
    }
}

/// A describe request that accepts `pageNum` / `pageSize`
pub trait PagedRequest: Request<Response: PagedResponse> + Clone {
    fn set_page(&mut self, page_num: i64, page_size: i64);
}

/// A describe response carrying `totalCount` and a `dataSet`
pub trait PagedResponse {
    type Item: Send;

    fn total_count(&self) -> i64;

    fn into_items(self) -> Vec<Self::Item>;
}

/// Response of actions that return nothing but a request id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Empty {
    pub request_id: String,
}

/// Client bound to one service (`zec`, `user`, `traffic`)
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    service: &'static str,
    version: &'static str,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, service: &'static str, version: &'static str) -> Self {
        Self {
            transport,
            service,
            version,
        }
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Send one request and decode its response
    pub async fn send<R: Request>(&self, request: &R) -> Result<R::Response> {
        let mut body = serde_json::to_value(request).map_err(|e| SdkError::Decode {
            action: R::ACTION.to_string(),
            message: e.to_string(),
        })?;
        strip_nulls(&mut body);

        let mut value = self
            .transport
            .call(ApiRequest {
                service: self.service,
                version: self.version,
                action: R::ACTION,
                body,
            })
            .await?;
        strip_nulls(&mut value);

        serde_json::from_value(value).map_err(|e| SdkError::Decode {
            action: R::ACTION.to_string(),
            message: e.to_string(),
        })
    }
}

/// Remove every `null` member from JSON objects, recursively
pub fn strip_nulls(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            for v in map.values_mut() {
                strip_nulls(v);
            }
        }
        serde_json::Value::Array(items) => {
            for v in items.iter_mut() {
                strip_nulls(v);
            }
        }
        _ => {}
    }
}

/// Bind a request struct to its action name and response type
#[macro_export]
macro_rules! request {
    ($req:ty => $resp:ty, $action:literal) => {
        impl $crate::client::Request for $req {
            const ACTION: &'static str = $action;
            type Response = $resp;
        }
    };
}

/// Mark a describe request/response pair as paginated
///
/// The request must have `page_num` / `page_size` option fields and the
/// response `total_count` / `data_set`.
#[macro_export]
macro_rules! paged {
    ($req:ty => $resp:ty, $item:ty) => {
        impl $crate::client::PagedRequest for $req {
            fn set_page(&mut self, page_num: i64, page_size: i64) {
                self.page_num = Some(page_num);
                self.page_size = Some(page_size);
            }
        }

        impl $crate::client::PagedResponse for $resp {
            type Item = $item;

            fn total_count(&self) -> i64 {
                self.total_count
            }

            fn into_items(self) -> Vec<$item> {
                self.data_set
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Default, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct EchoRequest {
        name: Option<String>,
        vpc_id: String,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    struct EchoResponse {
        name: String,
        mtu: i64,
    }

    request!(EchoRequest => EchoResponse, "Echo");

    struct Recorder {
        seen: Mutex<Vec<serde_json::Value>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn call(&self, request: ApiRequest) -> Result<serde_json::Value> {
            self.seen.lock().unwrap().push(request.body);
            Ok(serde_json::json!({"name": null, "mtu": 1500}))
        }
    }

    #[test]
    fn test_send_strips_nulls_both_ways() {
        let recorder = Arc::new(Recorder {
            seen: Mutex::new(Vec::new()),
        });
        let client = ApiClient::new(recorder.clone(), "zec", "2024-04-01");

        let resp = tokio_test::block_on(client.send(&EchoRequest {
            name: None,
            vpc_id: "vpc-1".into(),
        }))
        .unwrap();

        assert_eq!(resp.name, "");
        assert_eq!(resp.mtu, 1500);

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen[0], serde_json::json!({"vpcId": "vpc-1"}));
    }
}
