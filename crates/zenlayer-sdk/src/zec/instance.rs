//! Compute instances

use crate::client::Empty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemDisk {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub disk_id: String,
    pub disk_size: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub disk_category: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateZecInstancesRequest {
    pub zone_id: String,
    pub instance_type: String,
    pub image_id: String,
    pub instance_name: String,
    pub password: Option<String>,
    pub key_id: Option<String>,
    pub subnet_id: String,
    pub lan_ip: Option<String>,
    pub system_disk: SystemDisk,
    pub time_zone: Option<String>,
    pub enable_agent: Option<bool>,
    pub security_group_id: Option<String>,
    pub resource_group_id: Option<String>,
    pub instance_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateZecInstancesResponse {
    pub instance_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeInstancesRequest {
    pub instance_ids: Option<Vec<String>>,
    pub zone_id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub image_id: Option<String>,
    pub ipv4_address: Option<String>,
    pub resource_group_id: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeInstancesResponse {
    pub total_count: i64,
    pub data_set: Vec<InstanceInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstanceInfo {
    pub instance_id: String,
    pub instance_name: String,
    pub zone_id: String,
    pub instance_type: String,
    pub cpu: i64,
    pub memory: i64,
    pub image_id: String,
    pub image_name: String,
    pub status: String,
    pub key_id: String,
    pub time_zone: String,
    pub enable_agent: bool,
    pub system_disk: SystemDisk,
    pub data_disks: Vec<SystemDisk>,
    pub subnet_id: String,
    pub vpc_id: String,
    pub nic_id: String,
    pub security_group_id: String,
    pub private_ip_addresses: Vec<String>,
    pub public_ip_addresses: Vec<String>,
    pub resource_group_id: String,
    pub resource_group_name: String,
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyInstancesAttributeRequest {
    pub instance_ids: Vec<String>,
    pub instance_name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyInstanceTypeRequest {
    pub instance_id: String,
    pub instance_type: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartInstancesRequest {
    pub instance_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopInstancesRequest {
    pub instance_ids: Vec<String>,
}

/// Reinstall the operating system; the instance must be stopped
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetInstanceRequest {
    pub instance_id: String,
    pub image_id: String,
    pub password: Option<String>,
    pub key_id: Option<String>,
    pub time_zone: Option<String>,
    pub enable_agent: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetInstancesPasswordRequest {
    pub instance_ids: Vec<String>,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteInstanceRequest {
    pub instance_id: String,
}

crate::request!(CreateZecInstancesRequest => CreateZecInstancesResponse, "CreateZecInstances");
crate::request!(DescribeInstancesRequest => DescribeInstancesResponse, "DescribeInstances");
crate::request!(ModifyInstancesAttributeRequest => Empty, "ModifyInstancesAttribute");
crate::request!(ModifyInstanceTypeRequest => Empty, "ModifyInstanceType");
crate::request!(StartInstancesRequest => Empty, "StartInstances");
crate::request!(StopInstancesRequest => Empty, "StopInstances");
crate::request!(ResetInstanceRequest => Empty, "ResetInstance");
crate::request!(ResetInstancesPasswordRequest => Empty, "ResetInstancesPassword");
crate::request!(DeleteInstanceRequest => Empty, "DeleteInstance");
crate::paged!(DescribeInstancesRequest => DescribeInstancesResponse, InstanceInfo);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_omits_empty_disk_fields() {
        let req = CreateZecInstancesRequest {
            zone_id: "asia-east-1a".into(),
            system_disk: SystemDisk {
                disk_size: 40,
                ..Default::default()
            },
            instance_count: 1,
            ..Default::default()
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["systemDisk"], serde_json::json!({"diskSize": 40}));
        assert_eq!(body["instanceCount"], 1);
    }
}
