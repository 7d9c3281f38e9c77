//! User service: resource groups

use crate::client::Empty;
use serde::{Deserialize, Serialize};

pub const SERVICE: &str = "user";
pub const VERSION: &str = "2022-11-20";

/// Move resources into a resource group
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResourceResourceGroupRequest {
    pub resource_group_id: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeResourceGroupsRequest {
    pub resource_group_ids: Option<Vec<String>>,
    pub name: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeResourceGroupsResponse {
    pub total_count: i64,
    pub data_set: Vec<ResourceGroupInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceGroupInfo {
    pub resource_group_id: String,
    pub resource_group_name: String,
    pub description: String,
    pub create_time: String,
}

crate::request!(AddResourceResourceGroupRequest => Empty, "AddResourceResourceGroup");
crate::request!(DescribeResourceGroupsRequest => DescribeResourceGroupsResponse, "DescribeResourceGroups");
crate::paged!(DescribeResourceGroupsRequest => DescribeResourceGroupsResponse, ResourceGroupInfo);
