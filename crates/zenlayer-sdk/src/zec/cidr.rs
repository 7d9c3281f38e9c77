//! Public CIDR blocks (address pools)

use crate::client::Empty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCidrRequest {
    pub region_id: String,
    pub name: String,
    pub netmask: i64,
    pub network_type: String,
    pub amount: i64,
    pub resource_group_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCidrResponse {
    pub cidr_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeCidrsRequest {
    pub cidr_ids: Option<Vec<String>>,
    pub region_id: Option<String>,
    pub name: Option<String>,
    pub cidr_block: Option<String>,
    pub status: Option<String>,
    pub resource_group_id: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeCidrsResponse {
    pub total_count: i64,
    pub data_set: Vec<CidrInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CidrInfo {
    pub cidr_id: String,
    pub name: String,
    pub region_id: String,
    pub cidr_block: String,
    pub netmask: i64,
    pub network_type: String,
    pub status: String,
    pub used_count: i64,
    pub resource_group_id: String,
    pub resource_group_name: String,
    pub create_time: String,
    pub expired_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyCidrAttributeRequest {
    pub cidr_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCidrRequest {
    pub cidr_id: String,
}

crate::request!(CreateCidrRequest => CreateCidrResponse, "CreateCidr");
crate::request!(DescribeCidrsRequest => DescribeCidrsResponse, "DescribeCidrs");
crate::request!(ModifyCidrAttributeRequest => Empty, "ModifyCidrAttribute");
crate::request!(DeleteCidrRequest => Empty, "DeleteCidr");
crate::paged!(DescribeCidrsRequest => DescribeCidrsResponse, CidrInfo);
