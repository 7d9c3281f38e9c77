//! Zenlayer border gateways (ZBG)

use crate::client::Empty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBorderGatewayRequest {
    pub vpc_id: String,
    pub region_id: String,
    pub name: String,
    pub asn: Option<i64>,
    pub advertised_cidrs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateBorderGatewayResponse {
    pub zbg_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeBorderGatewaysRequest {
    pub zbg_ids: Option<Vec<String>>,
    pub vpc_id: Option<String>,
    pub region_id: Option<String>,
    pub name: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeBorderGatewaysResponse {
    pub total_count: i64,
    pub data_set: Vec<BorderGatewayInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BorderGatewayInfo {
    pub zbg_id: String,
    pub name: String,
    pub vpc_id: String,
    pub region_id: String,
    pub asn: i64,
    pub advertised_cidrs: Vec<String>,
    pub nat_id: String,
    pub inter_connect_cidr: String,
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyBorderGatewayAttributeRequest {
    pub zbg_id: String,
    pub name: Option<String>,
    pub asn: Option<i64>,
    pub advertised_cidrs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBorderGatewayNatRequest {
    pub zbg_id: String,
    pub nat_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignBorderGatewayNatRequest {
    pub zbg_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBorderGatewayRequest {
    pub zbg_id: String,
}

crate::request!(CreateBorderGatewayRequest => CreateBorderGatewayResponse, "CreateBorderGateway");
crate::request!(DescribeBorderGatewaysRequest => DescribeBorderGatewaysResponse, "DescribeBorderGateways");
crate::request!(ModifyBorderGatewayAttributeRequest => Empty, "ModifyBorderGatewayAttribute");
crate::request!(AssignBorderGatewayNatRequest => Empty, "AssignBorderGatewayNat");
crate::request!(UnassignBorderGatewayNatRequest => Empty, "UnassignBorderGatewayNat");
crate::request!(DeleteBorderGatewayRequest => Empty, "DeleteBorderGateway");
crate::paged!(DescribeBorderGatewaysRequest => DescribeBorderGatewaysResponse, BorderGatewayInfo);
