//! Provider without credentials, for commands that never reach the API

use async_trait::async_trait;
use std::sync::Arc;
use zenlayer_cloud::Provider;
use zenlayer_provider::{ZenlayerClient, provider_with_client};
use zenlayer_sdk::{ApiRequest, SdkError, Transport};

struct Offline;

#[async_trait]
impl Transport for Offline {
    async fn call(&self, request: ApiRequest) -> zenlayer_sdk::Result<serde_json::Value> {
        Err(SdkError::Credential(format!(
            "{} needs credentials, but this command runs offline",
            request.action
        )))
    }
}

pub fn provider() -> Provider<ZenlayerClient> {
    provider_with_client(ZenlayerClient::with_transport(Arc::new(Offline)), 1)
}
