use super::ZecService;
use crate::service::{opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, StateRefreshFunc, describe_all, state_refresh};
use zenlayer_sdk::zec::{DescribeEipsRequest, EipInfo};

#[derive(Debug, Clone, Default)]
pub struct EipFilter {
    pub ids: Vec<String>,
    pub region_id: String,
    pub name: String,
    pub status: String,
    pub ip_address: String,
    pub associated_id: String,
    pub cidr_id: String,
    pub resource_group_id: String,
}

impl EipFilter {
    fn to_request(&self) -> DescribeEipsRequest {
        DescribeEipsRequest {
            eip_ids: opt_vec(&self.ids),
            region_id: opt(&self.region_id),
            name: opt(&self.name),
            status: opt(&self.status),
            ip_address: opt(&self.ip_address),
            associated_id: opt(&self.associated_id),
            cidr_id: opt(&self.cidr_id),
            resource_group_id: opt(&self.resource_group_id),
            ..Default::default()
        }
    }
}

impl ZecService {
    pub async fn describe_eip_by_id(&self, ctx: &OpContext, eip_id: &str) -> Result<Option<EipInfo>> {
        let filter = EipFilter {
            ids: vec![eip_id.to_string()],
            ..Default::default()
        };
        self.describe_one(ctx, filter.to_request()).await
    }

    pub async fn describe_eips_by_filter(&self, ctx: &OpContext, filter: &EipFilter) -> Result<Vec<EipInfo>> {
        describe_all(ctx, self.client(), filter.to_request()).await
    }

    pub fn eip_state_refresh<'a>(
        &'a self,
        ctx: &'a OpContext,
        eip_id: &'a str,
        failed: &'static [&'static str],
    ) -> StateRefreshFunc<'a, EipInfo> {
        state_refresh(
            format!("EIP {eip_id}"),
            move || self.describe_eip_by_id(ctx, eip_id),
            |eip| eip.status.clone(),
            failed,
        )
    }
}
