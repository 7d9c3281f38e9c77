//! Virtual network interfaces (vNIC)

use crate::client::Empty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNetworkInterfaceRequest {
    pub name: String,
    pub subnet_id: String,
    pub primary_ipv4: Option<String>,
    pub stack_type: Option<String>,
    pub security_group_id: Option<String>,
    pub resource_group_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateNetworkInterfaceResponse {
    pub nic_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeNetworkInterfacesRequest {
    pub nic_ids: Option<Vec<String>>,
    pub name: Option<String>,
    pub region_id: Option<String>,
    pub vpc_id: Option<String>,
    pub subnet_id: Option<String>,
    pub instance_id: Option<String>,
    pub status: Option<String>,
    pub resource_group_id: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeNetworkInterfacesResponse {
    pub total_count: i64,
    pub data_set: Vec<NicInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NicInfo {
    pub nic_id: String,
    pub name: String,
    pub region_id: String,
    pub vpc_id: String,
    pub subnet_id: String,
    pub instance_id: String,
    pub status: String,
    pub nic_type: String,
    pub stack_type: String,
    pub primary_ipv4: String,
    pub primary_ipv6: String,
    /// All private IPv4 addresses, primary included
    pub private_ip_addresses: Vec<String>,
    pub security_group_id: String,
    pub resource_group_id: String,
    pub resource_group_name: String,
    pub create_time: String,
}

impl NicInfo {
    /// Private IPv4 addresses other than the primary one
    pub fn secondary_ipv4(&self) -> Vec<String> {
        self.private_ip_addresses
            .iter()
            .filter(|ip| **ip != self.primary_ipv4)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyNetworkInterfaceAttributeRequest {
    pub nic_id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNetworkInterfaceRequest {
    pub nic_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachNetworkInterfaceRequest {
    pub nic_id: String,
    pub instance_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetachNetworkInterfaceRequest {
    pub nic_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignNetworkInterfaceIpv4Request {
    pub nic_id: String,
    pub ip_addresses: Option<Vec<String>>,
    pub secondary_private_ip_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignNetworkInterfaceIpv4Request {
    pub nic_id: String,
    pub ip_addresses: Vec<String>,
}

crate::request!(CreateNetworkInterfaceRequest => CreateNetworkInterfaceResponse, "CreateNetworkInterface");
crate::request!(DescribeNetworkInterfacesRequest => DescribeNetworkInterfacesResponse, "DescribeNetworkInterfaces");
crate::request!(ModifyNetworkInterfaceAttributeRequest => Empty, "ModifyNetworkInterfaceAttribute");
crate::request!(DeleteNetworkInterfaceRequest => Empty, "DeleteNetworkInterface");
crate::request!(AttachNetworkInterfaceRequest => Empty, "AttachNetworkInterface");
crate::request!(DetachNetworkInterfaceRequest => Empty, "DetachNetworkInterface");
crate::request!(AssignNetworkInterfaceIpv4Request => Empty, "AssignNetworkInterfaceIpv4");
crate::request!(UnassignNetworkInterfaceIpv4Request => Empty, "UnassignNetworkInterfaceIpv4");
crate::paged!(DescribeNetworkInterfacesRequest => DescribeNetworkInterfacesResponse, NicInfo);
