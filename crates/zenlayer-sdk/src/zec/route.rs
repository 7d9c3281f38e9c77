//! VPC static and policy routes

use crate::client::Empty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVpcRouteRequest {
    pub vpc_id: String,
    pub ip_version: String,
    pub route_type: String,
    pub destination_cidr_block: String,
    pub source_ip: Option<String>,
    pub next_hop_id: String,
    pub name: Option<String>,
    pub priority: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateVpcRouteResponse {
    pub route_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeVpcRoutesRequest {
    pub route_ids: Option<Vec<String>>,
    pub vpc_id: Option<String>,
    pub ip_version: Option<String>,
    pub route_type: Option<String>,
    pub destination_cidr_block: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeVpcRoutesResponse {
    pub total_count: i64,
    pub data_set: Vec<RouteInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteInfo {
    pub route_id: String,
    pub name: String,
    pub vpc_id: String,
    pub ip_version: String,
    /// `RouteTypeStatic` or `RouteTypePolicy`
    pub route_type: String,
    pub destination_cidr_block: String,
    pub source_ip: String,
    pub next_hop_id: String,
    pub next_hop_name: String,
    /// Derived by the remote from `next_hop_id`
    pub next_hop_type: String,
    pub priority: i64,
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyVpcRouteAttributeRequest {
    pub route_id: String,
    pub name: Option<String>,
    pub priority: Option<i64>,
    pub next_hop_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVpcRouteRequest {
    pub route_id: String,
}

crate::request!(CreateVpcRouteRequest => CreateVpcRouteResponse, "CreateVpcRoute");
crate::request!(DescribeVpcRoutesRequest => DescribeVpcRoutesResponse, "DescribeVpcRoutes");
crate::request!(ModifyVpcRouteAttributeRequest => Empty, "ModifyVpcRouteAttribute");
crate::request!(DeleteVpcRouteRequest => Empty, "DeleteVpcRoute");
crate::paged!(DescribeVpcRoutesRequest => DescribeVpcRoutesResponse, RouteInfo);
