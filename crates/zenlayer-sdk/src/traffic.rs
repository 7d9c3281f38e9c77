//! Traffic service: bandwidth clusters

use serde::{Deserialize, Serialize};

pub const SERVICE: &str = "traffic";
pub const VERSION: &str = "2022-11-20";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeBandwidthClustersRequest {
    pub bandwidth_cluster_ids: Option<Vec<String>>,
    pub city_name: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeBandwidthClustersResponse {
    pub total_count: i64,
    pub data_set: Vec<BandwidthClusterInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BandwidthClusterInfo {
    pub bandwidth_cluster_id: String,
    pub bandwidth_cluster_name: String,
    pub area_code: String,
    pub city_name: String,
    pub network_type: String,
    pub commit_bandwidth_mbps: i64,
    pub status: String,
    pub create_time: String,
}

crate::request!(DescribeBandwidthClustersRequest => DescribeBandwidthClustersResponse, "DescribeBandwidthClusters");
crate::paged!(DescribeBandwidthClustersRequest => DescribeBandwidthClustersResponse, BandwidthClusterInfo);
