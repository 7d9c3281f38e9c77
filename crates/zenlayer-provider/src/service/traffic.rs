//! Traffic service: bandwidth clusters

use super::{opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, describe_all};
use zenlayer_sdk::ApiClient;
use zenlayer_sdk::traffic::{BandwidthClusterInfo, DescribeBandwidthClustersRequest};

#[derive(Debug, Clone, Default)]
pub struct BandwidthClusterFilter {
    pub ids: Vec<String>,
    pub city_name: String,
}

#[derive(Clone)]
pub struct TrafficService {
    client: ApiClient,
}

impl TrafficService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn describe_bandwidth_clusters_by_filter(
        &self,
        ctx: &OpContext,
        filter: &BandwidthClusterFilter,
    ) -> Result<Vec<BandwidthClusterInfo>> {
        let request = DescribeBandwidthClustersRequest {
            bandwidth_cluster_ids: opt_vec(&filter.ids),
            city_name: opt(&filter.city_name),
            ..Default::default()
        };
        describe_all(ctx, &self.client, request).await
    }
}
