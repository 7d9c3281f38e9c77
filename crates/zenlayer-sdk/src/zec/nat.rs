//! NAT gateways and their SNAT / DNAT entries

use crate::client::Empty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNatGatewayRequest {
    pub region_id: String,
    pub vpc_id: String,
    pub name: String,
    pub subnet_ids: Option<Vec<String>>,
    pub is_all_subnets: Option<bool>,
    pub security_group_id: Option<String>,
    pub resource_group_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateNatGatewayResponse {
    pub nat_gateway_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeNatGatewaysRequest {
    pub nat_gateway_ids: Option<Vec<String>>,
    pub region_id: Option<String>,
    pub vpc_id: Option<String>,
    pub name: Option<String>,
    pub resource_group_id: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeNatGatewaysResponse {
    pub total_count: i64,
    pub data_set: Vec<NatGatewayInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NatGatewayInfo {
    pub nat_gateway_id: String,
    pub name: String,
    pub region_id: String,
    pub vpc_id: String,
    pub subnet_ids: Vec<String>,
    pub is_all_subnets: bool,
    pub eip_ids: Vec<String>,
    pub security_group_id: String,
    pub icmp_reply_enabled: bool,
    pub zbg_id: String,
    pub status: String,
    pub resource_group_id: String,
    pub resource_group_name: String,
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeNatGatewayDetailRequest {
    pub nat_gateway_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeNatGatewayDetailResponse {
    pub snats: Vec<SnatEntry>,
    pub dnats: Vec<DnatEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnatEntry {
    pub snat_entry_id: String,
    pub nat_gateway_id: String,
    pub eip_ids: Vec<String>,
    pub is_all_eip: bool,
    pub subnet_ids: Vec<String>,
    pub source_cidr_blocks: Vec<String>,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DnatEntry {
    pub dnat_entry_id: String,
    pub nat_gateway_id: String,
    pub eip_id: String,
    pub protocol: String,
    pub private_ip: String,
    pub listener_port: String,
    pub internal_port: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyNatGatewayAttributeRequest {
    pub nat_gateway_id: String,
    pub name: Option<String>,
    pub subnet_ids: Option<Vec<String>>,
    pub is_all_subnets: Option<bool>,
    pub security_group_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyNatGatewayIcmpReplyRequest {
    pub nat_gateway_id: String,
    pub icmp_reply_enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNatGatewayRequest {
    pub nat_gateway_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSnatEntryRequest {
    pub nat_gateway_id: String,
    pub eip_ids: Option<Vec<String>>,
    pub is_all_eip: Option<bool>,
    pub subnet_ids: Option<Vec<String>>,
    pub source_cidr_blocks: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateSnatEntryResponse {
    pub snat_entry_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifySnatEntryRequest {
    pub snat_entry_id: String,
    pub eip_ids: Option<Vec<String>>,
    pub is_all_eip: Option<bool>,
    pub subnet_ids: Option<Vec<String>>,
    pub source_cidr_blocks: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSnatEntryRequest {
    pub snat_entry_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDnatEntryRequest {
    pub nat_gateway_id: String,
    pub eip_id: String,
    pub protocol: String,
    pub private_ip: String,
    pub listener_port: Option<String>,
    pub internal_port: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateDnatEntryResponse {
    pub dnat_entry_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyDnatEntryRequest {
    pub dnat_entry_id: String,
    pub eip_id: String,
    pub protocol: String,
    pub private_ip: String,
    pub listener_port: Option<String>,
    pub internal_port: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDnatEntryRequest {
    pub dnat_entry_id: String,
}

crate::request!(CreateNatGatewayRequest => CreateNatGatewayResponse, "CreateNatGateway");
crate::request!(DescribeNatGatewaysRequest => DescribeNatGatewaysResponse, "DescribeNatGateways");
crate::request!(DescribeNatGatewayDetailRequest => DescribeNatGatewayDetailResponse, "DescribeNatGatewayDetail");
crate::request!(ModifyNatGatewayAttributeRequest => Empty, "ModifyNatGatewayAttribute");
crate::request!(ModifyNatGatewayIcmpReplyRequest => Empty, "ModifyNatGatewayIcmpReply");
crate::request!(DeleteNatGatewayRequest => Empty, "DeleteNatGateway");
crate::request!(CreateSnatEntryRequest => CreateSnatEntryResponse, "CreateSnatEntry");
crate::request!(ModifySnatEntryRequest => Empty, "ModifySnatEntry");
crate::request!(DeleteSnatEntryRequest => Empty, "DeleteSnatEntry");
crate::request!(CreateDnatEntryRequest => CreateDnatEntryResponse, "CreateDnatEntry");
crate::request!(ModifyDnatEntryRequest => Empty, "ModifyDnatEntry");
crate::request!(DeleteDnatEntryRequest => Empty, "DeleteDnatEntry");
crate::paged!(DescribeNatGatewaysRequest => DescribeNatGatewaysResponse, NatGatewayInfo);
