//! Block storage disks

use crate::client::Empty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDisksRequest {
    pub zone_id: String,
    pub disk_name: String,
    pub disk_size: i64,
    pub disk_amount: i64,
    pub disk_category: Option<String>,
    pub snapshot_id: Option<String>,
    pub resource_group_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateDisksResponse {
    pub disk_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeDisksRequest {
    pub disk_ids: Option<Vec<String>>,
    pub disk_name: Option<String>,
    pub status: Option<String>,
    pub disk_type: Option<String>,
    pub disk_category: Option<String>,
    pub instance_id: Option<String>,
    pub zone_id: Option<String>,
    pub resource_group_id: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeDisksResponse {
    pub total_count: i64,
    pub data_set: Vec<DiskInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiskInfo {
    pub disk_id: String,
    pub disk_name: String,
    pub zone_id: String,
    /// `SYSTEM` or `DATA`
    pub disk_type: String,
    pub disk_size: i64,
    pub disk_category: String,
    pub instance_id: String,
    pub instance_name: String,
    pub status: String,
    pub snapshot_id: String,
    pub auto_snapshot_policy_id: String,
    pub resource_group_id: String,
    pub resource_group_name: String,
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyDisksAttributesRequest {
    pub disk_ids: Vec<String>,
    pub disk_name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeDiskRequest {
    pub disk_id: String,
    pub disk_size: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachDisksRequest {
    pub disk_ids: Vec<String>,
    pub instance_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetachDisksRequest {
    pub disk_ids: Vec<String>,
}

/// Deleting an available disk moves it to the recycle bin; deleting a
/// recycled disk releases it permanently.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDiskRequest {
    pub disk_id: String,
}

crate::request!(CreateDisksRequest => CreateDisksResponse, "CreateDisks");
crate::request!(DescribeDisksRequest => DescribeDisksResponse, "DescribeDisks");
crate::request!(ModifyDisksAttributesRequest => Empty, "ModifyDisksAttributes");
crate::request!(ResizeDiskRequest => Empty, "ResizeDisk");
crate::request!(AttachDisksRequest => Empty, "AttachDisks");
crate::request!(DetachDisksRequest => Empty, "DetachDisks");
crate::request!(DeleteDiskRequest => Empty, "DeleteDisk");
crate::paged!(DescribeDisksRequest => DescribeDisksResponse, DiskInfo);
