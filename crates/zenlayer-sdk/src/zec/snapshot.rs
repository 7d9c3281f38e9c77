//! Disk snapshots and auto-snapshot policies

use crate::client::Empty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSnapshotRequest {
    pub disk_id: String,
    pub snapshot_name: String,
    pub retention_time: Option<String>,
    pub resource_group_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateSnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeSnapshotsRequest {
    pub snapshot_ids: Option<Vec<String>>,
    pub zone_id: Option<String>,
    pub disk_ids: Option<Vec<String>>,
    pub status: Option<String>,
    pub snapshot_name: Option<String>,
    pub snapshot_type: Option<String>,
    pub resource_group_id: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeSnapshotsResponse {
    pub total_count: i64,
    pub data_set: Vec<SnapshotInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapshotInfo {
    pub snapshot_id: String,
    pub snapshot_name: String,
    pub zone_id: String,
    pub disk_id: String,
    pub status: String,
    /// `Auto` or `Manual`
    pub snapshot_type: String,
    pub retention_time: String,
    pub resource_group_id: String,
    pub resource_group_name: String,
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifySnapshotsAttributeRequest {
    pub snapshot_ids: Vec<String>,
    pub snapshot_name: Option<String>,
    pub retention_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSnapshotsRequest {
    pub snapshot_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAutoSnapshotPolicyRequest {
    pub zone_id: String,
    pub name: String,
    pub repeat_week_days: Vec<i64>,
    pub hours: Vec<i64>,
    pub retention_days: Option<i64>,
    pub resource_group_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateAutoSnapshotPolicyResponse {
    pub auto_snapshot_policy_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeAutoSnapshotPoliciesRequest {
    pub auto_snapshot_policy_ids: Option<Vec<String>>,
    pub zone_id: Option<String>,
    pub name: Option<String>,
    pub resource_group_id: Option<String>,
    pub page_num: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeAutoSnapshotPoliciesResponse {
    pub total_count: i64,
    pub data_set: Vec<AutoSnapshotPolicyInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoSnapshotPolicyInfo {
    pub auto_snapshot_policy_id: String,
    pub name: String,
    pub zone_id: String,
    pub repeat_week_days: Vec<i64>,
    pub hours: Vec<i64>,
    pub retention_days: i64,
    pub disk_ids: Vec<String>,
    pub disk_num: i64,
    pub resource_group_id: String,
    pub resource_group_name: String,
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyAutoSnapshotPolicyRequest {
    pub auto_snapshot_policy_id: String,
    pub name: Option<String>,
    pub repeat_week_days: Option<Vec<i64>>,
    pub hours: Option<Vec<i64>>,
    pub retention_days: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAutoSnapshotPolicyRequest {
    pub auto_snapshot_policy_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyAutoSnapshotPolicyRequest {
    pub auto_snapshot_policy_id: String,
    pub disk_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAutoSnapshotPolicyRequest {
    pub disk_ids: Vec<String>,
}

crate::request!(CreateSnapshotRequest => CreateSnapshotResponse, "CreateSnapshot");
crate::request!(DescribeSnapshotsRequest => DescribeSnapshotsResponse, "DescribeSnapshots");
crate::request!(ModifySnapshotsAttributeRequest => Empty, "ModifySnapshotsAttribute");
crate::request!(DeleteSnapshotsRequest => Empty, "DeleteSnapshots");
crate::request!(CreateAutoSnapshotPolicyRequest => CreateAutoSnapshotPolicyResponse, "CreateAutoSnapshotPolicy");
crate::request!(DescribeAutoSnapshotPoliciesRequest => DescribeAutoSnapshotPoliciesResponse, "DescribeAutoSnapshotPolicies");
crate::request!(ModifyAutoSnapshotPolicyRequest => Empty, "ModifyAutoSnapshotPolicy");
crate::request!(DeleteAutoSnapshotPolicyRequest => Empty, "DeleteAutoSnapshotPolicy");
crate::request!(ApplyAutoSnapshotPolicyRequest => Empty, "ApplyAutoSnapshotPolicy");
crate::request!(CancelAutoSnapshotPolicyRequest => Empty, "CancelAutoSnapshotPolicy");
crate::paged!(DescribeSnapshotsRequest => DescribeSnapshotsResponse, SnapshotInfo);
crate::paged!(DescribeAutoSnapshotPoliciesRequest => DescribeAutoSnapshotPoliciesResponse, AutoSnapshotPolicyInfo);
