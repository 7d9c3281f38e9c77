//! `zenlayercloud_bandwidth_clusters`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::traffic::BandwidthClusterFilter;
use async_trait::async_trait;
use serde_json::json;
use zenlayer_cloud::{AttributeSchema, AttributeType, DataSource, OpContext, ResourceData, ResourceSchema, Result};

pub struct BandwidthClustersDataSource;

#[async_trait]
impl DataSource<ZenlayerClient> for BandwidthClustersDataSource {
    fn type_name(&self) -> &'static str {
        "bandwidth_clusters"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "bandwidth_clusters", true)
            .with_description("Query shared bandwidth clusters")
            .attribute(AttributeSchema::new("city_name", AttributeType::String))
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = BandwidthClusterFilter {
            ids: d.get_string_list("ids"),
            city_name: d.get_string("city_name"),
        };
        let clusters = meta.traffic().describe_bandwidth_clusters_by_filter(ctx, &filter).await?;
        let entries = clusters
            .iter()
            .filter(|cluster| names.matches(&cluster.bandwidth_cluster_name))
            .map(|cluster| {
                let entry = json!({
                    "id": cluster.bandwidth_cluster_id,
                    "name": cluster.bandwidth_cluster_name,
                    "area_code": cluster.area_code,
                    "city_name": cluster.city_name,
                    "network_type": cluster.network_type,
                    "commit_bandwidth_mbps": cluster.commit_bandwidth_mbps,
                    "status": cluster.status,
                    "create_time": cluster.create_time,
                });
                (cluster.bandwidth_cluster_id.clone(), entry)
            })
            .collect();
        publish(d, "bandwidth_clusters", entries).await
    }
}
