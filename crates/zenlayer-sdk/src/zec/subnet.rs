//! Regional subnet

use crate::client::Empty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubnetRequest {
    pub region_id: String,
    pub vpc_id: String,
    pub name: String,
    pub cidr_block: Option<String>,
    pub stack_type: String,
    pub ipv6_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateSubnetResponse {
    pub subnet_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeSubnetsRequest {
    pub subnet_ids: Option<Vec<String>>,
    pub region_id: Option<String>,
    pub vpc_id: Option<String>,
    pub cidr_block: Option<String>,
    pub name: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeSubnetsResponse {
    pub total_count: i64,
    pub data_set: Vec<SubnetInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubnetInfo {
    pub subnet_id: String,
    pub name: String,
    pub region_id: String,
    pub vpc_id: String,
    pub cidr_block: String,
    pub ipv6_cidr_block: String,
    pub ipv6_type: String,
    pub stack_type: String,
    pub is_default: bool,
    pub usage_ip_count: i64,
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifySubnetAttributeRequest {
    pub subnet_id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifySubnetStackTypeRequest {
    pub subnet_id: String,
    pub stack_type: String,
    pub ipv6_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSubnetRequest {
    pub subnet_id: String,
}

crate::request!(CreateSubnetRequest => CreateSubnetResponse, "CreateSubnet");
crate::request!(DescribeSubnetsRequest => DescribeSubnetsResponse, "DescribeSubnets");
crate::request!(ModifySubnetAttributeRequest => Empty, "ModifySubnetAttribute");
crate::request!(ModifySubnetStackTypeRequest => Empty, "ModifySubnetStackType");
crate::request!(DeleteSubnetRequest => Empty, "DeleteSubnet");
crate::paged!(DescribeSubnetsRequest => DescribeSubnetsResponse, SubnetInfo);
