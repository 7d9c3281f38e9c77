//! Zenlayer Cloud provider
//!
//! Registers every resource and data-source kind of the Zenlayer Elastic
//! Compute (ZEC) product family with a [`Provider`] registry, on top of a
//! lazily-built set of API clients.
//!
//! ```no_run
//! use tokio_util::sync::CancellationToken;
//! use zenlayer_config::{PartialConfig, resolve};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = resolve(PartialConfig::from_env()?)?;
//! let provider = zenlayer_provider::provider(&config)?;
//! let response = provider
//!     .read_data_source("zenlayercloud_zec_vpcs", Default::default(), CancellationToken::new())
//!     .await;
//! println!("{}", serde_json::to_string_pretty(&response.state)?);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod data_sources;
pub mod error;
pub mod resources;
pub mod service;

pub use client::ZenlayerClient;
pub use error::{ProviderError, Result};
pub use resources::PREFIX;

use data_sources::*;
use resources::*;
use zenlayer_cloud::{Provider, RetryConfig};
use zenlayer_config::ProviderConfig;

/// Build the provider from resolved configuration
pub fn provider(config: &ProviderConfig) -> Result<Provider<ZenlayerClient>> {
    let client = ZenlayerClient::new(config)?;
    Ok(provider_with_client(client, config.max_retries))
}

/// Build the provider over an existing client
pub fn provider_with_client(client: ZenlayerClient, max_retries: u32) -> Provider<ZenlayerClient> {
    let retry = RetryConfig {
        max_attempts: max_retries.max(1),
        ..RetryConfig::default()
    };

    Provider::new(PREFIX, client)
        .with_retry(retry)
        // network
        .resource(VpcResource)
        .resource(SubnetResource)
        .resource(VnicResource)
        .resource(VnicIpv4Resource)
        .resource(VnicAttachmentResource)
        .resource(SecurityGroupResource)
        .resource(SecurityGroupRuleSetResource)
        .resource(VpcSecurityGroupAttachmentResource)
        .resource(EipResource)
        .resource(EipAssociationResource)
        .resource(CidrResource)
        .resource(NatGatewayResource)
        .resource(NatGatewaySnatResource)
        .resource(NatGatewayDnatResource)
        .resource(BorderGatewayResource)
        .resource(VpcRouteResource)
        // compute and storage
        .resource(InstanceResource)
        .resource(DiskResource)
        .resource(DiskAttachmentResource)
        .resource(SnapshotResource)
        .resource(AutoSnapshotPolicyResource)
        .resource(AutoSnapshotPolicyAttachmentResource)
        .data_source(VpcsDataSource)
        .data_source(SubnetsDataSource)
        .data_source(VnicsDataSource)
        .data_source(DisksDataSource)
        .data_source(SnapshotsDataSource)
        .data_source(AutoSnapshotPoliciesDataSource)
        .data_source(EipsDataSource)
        .data_source(CidrsDataSource)
        .data_source(InstancesDataSource)
        .data_source(NatGatewaysDataSource)
        .data_source(SecurityGroupsDataSource)
        .data_source(BorderGatewaysDataSource)
        .data_source(VpcRoutesDataSource)
        .data_source(ResourceGroupsDataSource)
        .data_source(BandwidthClustersDataSource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use zenlayer_sdk::{ApiRequest, SdkError, Transport};

    struct NoTransport;

    #[async_trait::async_trait]
    impl Transport for NoTransport {
        async fn call(&self, request: ApiRequest) -> std::result::Result<serde_json::Value, SdkError> {
            Err(SdkError::api("UNREACHABLE", format!("{} called in a registry test", request.action)))
        }
    }

    fn registry() -> Provider<ZenlayerClient> {
        provider_with_client(ZenlayerClient::with_transport(Arc::new(NoTransport)), 3)
    }

    #[test]
    fn test_every_kind_is_registered() {
        let provider = registry();
        assert_eq!(provider.resource_types().len(), 22);
        assert_eq!(provider.data_source_types().len(), 15);
        assert!(provider.resource_types().contains(&"zenlayercloud_zec_eip_association"));
        assert!(provider.data_source_types().contains(&"zenlayercloud_resource_groups"));
        assert!(provider.resource_types().iter().all(|kind| kind.starts_with("zenlayercloud_")));
    }

    #[test]
    fn test_schema_names_match_registered_kinds() {
        let provider = registry();
        for kind in provider.resource_types() {
            assert_eq!(provider.resource_schema(kind).unwrap().name, kind);
        }
        for kind in provider.data_source_types() {
            assert_eq!(provider.data_source_schema(kind).unwrap().name, kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_reported() {
        let diagnostics = registry().validate("zenlayercloud_zec_unknown", &Default::default());
        assert_eq!(diagnostics.len(), 1);
    }
}
