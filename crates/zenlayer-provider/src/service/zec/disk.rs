use super::ZecService;
use crate::service::{opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, StateRefreshFunc, describe_all, state_refresh};
use zenlayer_sdk::zec::{DescribeDisksRequest, DiskInfo};

#[derive(Debug, Clone, Default)]
pub struct DiskFilter {
    pub ids: Vec<String>,
    pub name: String,
    pub status: String,
    pub disk_type: String,
    pub disk_category: String,
    pub instance_id: String,
    pub zone_id: String,
    pub resource_group_id: String,
}

impl DiskFilter {
    fn to_request(&self) -> DescribeDisksRequest {
        DescribeDisksRequest {
            disk_ids: opt_vec(&self.ids),
            disk_name: opt(&self.name),
            status: opt(&self.status),
            disk_type: opt(&self.disk_type),
            disk_category: opt(&self.disk_category),
            instance_id: opt(&self.instance_id),
            zone_id: opt(&self.zone_id),
            resource_group_id: opt(&self.resource_group_id),
            ..Default::default()
        }
    }
}

impl ZecService {
    pub async fn describe_disk_by_id(&self, ctx: &OpContext, disk_id: &str) -> Result<Option<DiskInfo>> {
        let filter = DiskFilter {
            ids: vec![disk_id.to_string()],
            ..Default::default()
        };
        self.describe_one(ctx, filter.to_request()).await
    }

    pub async fn describe_disks_by_filter(&self, ctx: &OpContext, filter: &DiskFilter) -> Result<Vec<DiskInfo>> {
        describe_all(ctx, self.client(), filter.to_request()).await
    }

    pub fn disk_state_refresh<'a>(
        &'a self,
        ctx: &'a OpContext,
        disk_id: &'a str,
        failed: &'static [&'static str],
    ) -> StateRefreshFunc<'a, DiskInfo> {
        state_refresh(
            format!("disk {disk_id}"),
            move || self.describe_disk_by_id(ctx, disk_id),
            |disk| disk.status.clone(),
            failed,
        )
    }
}
