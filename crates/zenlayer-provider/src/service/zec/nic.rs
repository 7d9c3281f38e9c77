use super::ZecService;
use crate::service::{opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, StateRefreshFunc, describe_all, state_refresh};
use zenlayer_sdk::zec::{DescribeNetworkInterfacesRequest, NicInfo};

#[derive(Debug, Clone, Default)]
pub struct NicFilter {
    pub ids: Vec<String>,
    pub name: String,
    pub region_id: String,
    pub vpc_id: String,
    pub subnet_id: String,
    pub instance_id: String,
    pub status: String,
    pub resource_group_id: String,
}

impl NicFilter {
    fn to_request(&self) -> DescribeNetworkInterfacesRequest {
        DescribeNetworkInterfacesRequest {
            nic_ids: opt_vec(&self.ids),
            name: opt(&self.name),
            region_id: opt(&self.region_id),
            vpc_id: opt(&self.vpc_id),
            subnet_id: opt(&self.subnet_id),
            instance_id: opt(&self.instance_id),
            status: opt(&self.status),
            resource_group_id: opt(&self.resource_group_id),
            ..Default::default()
        }
    }
}

impl ZecService {
    pub async fn describe_nic_by_id(&self, ctx: &OpContext, nic_id: &str) -> Result<Option<NicInfo>> {
        let filter = NicFilter {
            ids: vec![nic_id.to_string()],
            ..Default::default()
        };
        self.describe_one(ctx, filter.to_request()).await
    }

    pub async fn describe_nics_by_filter(&self, ctx: &OpContext, filter: &NicFilter) -> Result<Vec<NicInfo>> {
        describe_all(ctx, self.client(), filter.to_request()).await
    }

    pub fn nic_state_refresh<'a>(
        &'a self,
        ctx: &'a OpContext,
        nic_id: &'a str,
        failed: &'static [&'static str],
    ) -> StateRefreshFunc<'a, NicInfo> {
        state_refresh(
            format!("vNIC {nic_id}"),
            move || self.describe_nic_by_id(ctx, nic_id),
            |nic| nic.status.clone(),
            failed,
        )
    }
}
