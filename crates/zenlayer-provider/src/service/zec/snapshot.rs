use super::ZecService;
use crate::service::{opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, StateRefreshFunc, describe_all, state_refresh};
use zenlayer_sdk::zec::{
    AutoSnapshotPolicyInfo, DescribeAutoSnapshotPoliciesRequest, DescribeSnapshotsRequest, SnapshotInfo,
};

#[derive(Debug, Clone, Default)]
pub struct SnapshotFilter {
    pub ids: Vec<String>,
    pub zone_id: String,
    pub disk_ids: Vec<String>,
    pub status: String,
    pub name: String,
    pub snapshot_type: String,
    pub resource_group_id: String,
}

impl SnapshotFilter {
    fn to_request(&self) -> DescribeSnapshotsRequest {
        DescribeSnapshotsRequest {
            snapshot_ids: opt_vec(&self.ids),
            zone_id: opt(&self.zone_id),
            disk_ids: opt_vec(&self.disk_ids),
            status: opt(&self.status),
            snapshot_name: opt(&self.name),
            snapshot_type: opt(&self.snapshot_type),
            resource_group_id: opt(&self.resource_group_id),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AutoSnapshotPolicyFilter {
    pub ids: Vec<String>,
    pub zone_id: String,
    pub name: String,
    pub resource_group_id: String,
}

impl AutoSnapshotPolicyFilter {
    fn to_request(&self) -> DescribeAutoSnapshotPoliciesRequest {
        DescribeAutoSnapshotPoliciesRequest {
            auto_snapshot_policy_ids: opt_vec(&self.ids),
            zone_id: opt(&self.zone_id),
            name: opt(&self.name),
            resource_group_id: opt(&self.resource_group_id),
            ..Default::default()
        }
    }
}

impl ZecService {
    pub async fn describe_snapshot_by_id(
        &self,
        ctx: &OpContext,
        snapshot_id: &str,
    ) -> Result<Option<SnapshotInfo>> {
        let filter = SnapshotFilter {
            ids: vec![snapshot_id.to_string()],
            ..Default::default()
        };
        self.describe_one(ctx, filter.to_request()).await
    }

    pub async fn describe_snapshots_by_filter(
        &self,
        ctx: &OpContext,
        filter: &SnapshotFilter,
    ) -> Result<Vec<SnapshotInfo>> {
        describe_all(ctx, self.client(), filter.to_request()).await
    }

    pub fn snapshot_state_refresh<'a>(
        &'a self,
        ctx: &'a OpContext,
        snapshot_id: &'a str,
        failed: &'static [&'static str],
    ) -> StateRefreshFunc<'a, SnapshotInfo> {
        state_refresh(
            format!("snapshot {snapshot_id}"),
            move || self.describe_snapshot_by_id(ctx, snapshot_id),
            |snapshot| snapshot.status.clone(),
            failed,
        )
    }

    pub async fn describe_auto_snapshot_policy_by_id(
        &self,
        ctx: &OpContext,
        policy_id: &str,
    ) -> Result<Option<AutoSnapshotPolicyInfo>> {
        let filter = AutoSnapshotPolicyFilter {
            ids: vec![policy_id.to_string()],
            ..Default::default()
        };
        self.describe_one(ctx, filter.to_request()).await
    }

    pub async fn describe_auto_snapshot_policies_by_filter(
        &self,
        ctx: &OpContext,
        filter: &AutoSnapshotPolicyFilter,
    ) -> Result<Vec<AutoSnapshotPolicyInfo>> {
        describe_all(ctx, self.client(), filter.to_request()).await
    }
}
