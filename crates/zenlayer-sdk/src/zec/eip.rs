//! Elastic IPs

use crate::client::Empty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEipsRequest {
    pub region_id: String,
    pub name: String,
    pub ip_network_type: Option<String>,
    pub internet_charge_type: String,
    pub bandwidth: Option<i64>,
    pub cluster_id: Option<String>,
    pub cidr_id: Option<String>,
    pub amount: i64,
    pub resource_group_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateEipsResponse {
    pub eip_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeEipsRequest {
    pub eip_ids: Option<Vec<String>>,
    pub region_id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub ip_address: Option<String>,
    pub associated_id: Option<String>,
    pub cidr_id: Option<String>,
    pub resource_group_id: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeEipsResponse {
    pub total_count: i64,
    pub data_set: Vec<EipInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EipInfo {
    pub eip_id: String,
    pub name: String,
    pub region_id: String,
    pub ip_network_type: String,
    pub internet_charge_type: String,
    pub bandwidth: i64,
    pub bandwidth_cluster_id: String,
    pub cidr_id: String,
    pub public_ip_addresses: Vec<String>,
    pub private_ip_address: String,
    pub status: String,
    pub associated_id: String,
    pub associated_type: String,
    pub bind_type: String,
    pub resource_group_id: String,
    pub resource_group_name: String,
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyEipAttributeRequest {
    pub eip_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyEipBandwidthRequest {
    pub eip_ids: Vec<String>,
    pub bandwidth: Option<i64>,
    pub bandwidth_cluster_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociateEipAddressRequest {
    pub eip_ids: Vec<String>,
    pub associated_id: String,
    pub associated_type: String,
    pub private_ip_address: Option<String>,
    pub bind_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassociateEipAddressRequest {
    pub eip_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEipRequest {
    pub eip_id: String,
}

crate::request!(CreateEipsRequest => CreateEipsResponse, "CreateEips");
crate::request!(DescribeEipsRequest => DescribeEipsResponse, "DescribeEips");
crate::request!(ModifyEipAttributeRequest => Empty, "ModifyEipAttribute");
crate::request!(ModifyEipBandwidthRequest => Empty, "ModifyEipBandwidth");
crate::request!(AssociateEipAddressRequest => Empty, "AssociateEipAddress");
crate::request!(UnassociateEipAddressRequest => Empty, "UnassociateEipAddress");
crate::request!(DeleteEipRequest => Empty, "DeleteEip");
crate::paged!(DescribeEipsRequest => DescribeEipsResponse, EipInfo);
