//! Security groups and their rule sets

use crate::client::Empty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSecurityGroupRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateSecurityGroupResponse {
    pub security_group_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeSecurityGroupsRequest {
    pub security_group_ids: Option<Vec<String>>,
    pub name: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeSecurityGroupsResponse {
    pub total_count: i64,
    pub data_set: Vec<SecurityGroupInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityGroupInfo {
    pub security_group_id: String,
    pub security_group_name: String,
    pub description: String,
    pub is_default: bool,
    pub vpc_ids: Vec<String>,
    pub instance_ids: Vec<String>,
    pub rule_infos: Vec<RuleInfo>,
    pub create_time: String,
}

/// One ingress or egress rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleInfo {
    /// `ingress` or `egress`
    pub direction: String,
    /// `accept` or `drop`
    pub policy: String,
    pub priority: i64,
    pub ip_protocol: String,
    pub port_range: String,
    pub cidr_ip: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifySecurityGroupsAttributeRequest {
    pub security_group_ids: Vec<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSecurityGroupRequest {
    pub security_group_id: String,
}

/// Replace the whole rule set of a security group
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSecurityGroupRulesRequest {
    pub security_group_id: String,
    pub rule_infos: Vec<RuleInfo>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignSecurityGroupRequest {
    pub security_group_id: String,
    pub nic_ids: Vec<String>,
}

crate::request!(CreateSecurityGroupRequest => CreateSecurityGroupResponse, "CreateSecurityGroup");
crate::request!(DescribeSecurityGroupsRequest => DescribeSecurityGroupsResponse, "DescribeSecurityGroups");
crate::request!(ModifySecurityGroupsAttributeRequest => Empty, "ModifySecurityGroupsAttribute");
crate::request!(DeleteSecurityGroupRequest => Empty, "DeleteSecurityGroup");
crate::request!(ConfigSecurityGroupRulesRequest => Empty, "ConfigSecurityGroupRules");
crate::request!(AssignSecurityGroupRequest => Empty, "AssignSecurityGroup");
crate::paged!(DescribeSecurityGroupsRequest => DescribeSecurityGroupsResponse, SecurityGroupInfo);
