//! Global VPC

use crate::client::Empty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVpcRequest {
    pub name: String,
    pub cidr_block: String,
    pub mtu: Option<i64>,
    pub resource_group_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateVpcResponse {
    pub vpc_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeVpcsRequest {
    pub vpc_ids: Option<Vec<String>>,
    pub cidr_block: Option<String>,
    pub name: Option<String>,
    pub resource_group_id: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeVpcsResponse {
    pub total_count: i64,
    pub data_set: Vec<VpcInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VpcInfo {
    pub vpc_id: String,
    pub name: String,
    pub cidr_block: String,
    pub ipv6_cidr_block: String,
    pub mtu: i64,
    pub is_default: bool,
    pub security_group_id: String,
    pub subnet_ids: Vec<String>,
    pub usage_ip_count: i64,
    pub resource_group_id: String,
    pub resource_group_name: String,
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyVpcAttributeRequest {
    pub vpc_id: String,
    pub name: Option<String>,
    #[serde(rename = "enableIPv6")]
    pub enable_ipv6: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVpcRequest {
    pub vpc_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignVpcSecurityGroupRequest {
    pub vpc_id: String,
    pub security_group_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignVpcSecurityGroupRequest {
    pub vpc_id: String,
}

crate::request!(CreateVpcRequest => CreateVpcResponse, "CreateVpc");
crate::request!(DescribeVpcsRequest => DescribeVpcsResponse, "DescribeVpcs");
crate::request!(ModifyVpcAttributeRequest => Empty, "ModifyVpcAttribute");
crate::request!(DeleteVpcRequest => Empty, "DeleteVpc");
crate::request!(AssignVpcSecurityGroupRequest => Empty, "AssignVpcSecurityGroup");
crate::request!(UnassignVpcSecurityGroupRequest => Empty, "UnassignVpcSecurityGroup");
crate::paged!(DescribeVpcsRequest => DescribeVpcsResponse, VpcInfo);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vpc_info_defaults_missing_fields() {
        let info: VpcInfo =
            serde_json::from_str(r#"{"vpcId":"vpc-1","cidrBlock":"10.0.0.0/16"}"#).unwrap();
        assert_eq!(info.vpc_id, "vpc-1");
        assert_eq!(info.ipv6_cidr_block, "");
        assert!(!info.is_default);
    }

    #[test]
    fn test_enable_ipv6_wire_name() {
        let req = ModifyVpcAttributeRequest {
            vpc_id: "vpc-1".into(),
            name: None,
            enable_ipv6: Some(true),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["enableIPv6"], true);
    }
}
