use super::ZecService;
use crate::service::{opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, StateRefreshFunc, describe_all, state_refresh};
use zenlayer_sdk::zec::{DescribeInstancesRequest, InstanceInfo};

#[derive(Debug, Clone, Default)]
pub struct InstanceFilter {
    pub ids: Vec<String>,
    pub zone_id: String,
    pub name: String,
    pub status: String,
    pub image_id: String,
    pub ipv4_address: String,
    pub resource_group_id: String,
}

impl InstanceFilter {
    fn to_request(&self) -> DescribeInstancesRequest {
        DescribeInstancesRequest {
            instance_ids: opt_vec(&self.ids),
            zone_id: opt(&self.zone_id),
            name: opt(&self.name),
            status: opt(&self.status),
            image_id: opt(&self.image_id),
            ipv4_address: opt(&self.ipv4_address),
            resource_group_id: opt(&self.resource_group_id),
            ..Default::default()
        }
    }
}

impl ZecService {
    pub async fn describe_instance_by_id(
        &self,
        ctx: &OpContext,
        instance_id: &str,
    ) -> Result<Option<InstanceInfo>> {
        let filter = InstanceFilter {
            ids: vec![instance_id.to_string()],
            ..Default::default()
        };
        self.describe_one(ctx, filter.to_request()).await
    }

    pub async fn describe_instances_by_filter(
        &self,
        ctx: &OpContext,
        filter: &InstanceFilter,
    ) -> Result<Vec<InstanceInfo>> {
        describe_all(ctx, self.client(), filter.to_request()).await
    }

    pub fn instance_state_refresh<'a>(
        &'a self,
        ctx: &'a OpContext,
        instance_id: &'a str,
        failed: &'static [&'static str],
    ) -> StateRefreshFunc<'a, InstanceInfo> {
        state_refresh(
            format!("instance {instance_id}"),
            move || self.describe_instance_by_id(ctx, instance_id),
            |instance| instance.status.clone(),
            failed,
        )
    }
}
