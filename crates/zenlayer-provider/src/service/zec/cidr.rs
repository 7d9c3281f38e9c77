use super::ZecService;
use crate::service::{opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, StateRefreshFunc, describe_all, state_refresh};
use zenlayer_sdk::zec::{CidrInfo, DescribeCidrsRequest};

#[derive(Debug, Clone, Default)]
pub struct CidrFilter {
    pub ids: Vec<String>,
    pub region_id: String,
    pub name: String,
    pub cidr_block: String,
    pub status: String,
    pub resource_group_id: String,
}

impl CidrFilter {
    fn to_request(&self) -> DescribeCidrsRequest {
        DescribeCidrsRequest {
            cidr_ids: opt_vec(&self.ids),
            region_id: opt(&self.region_id),
            name: opt(&self.name),
            cidr_block: opt(&self.cidr_block),
            status: opt(&self.status),
            resource_group_id: opt(&self.resource_group_id),
            ..Default::default()
        }
    }
}

impl ZecService {
    pub async fn describe_cidr_by_id(&self, ctx: &OpContext, cidr_id: &str) -> Result<Option<CidrInfo>> {
        let filter = CidrFilter {
            ids: vec![cidr_id.to_string()],
            ..Default::default()
        };
        self.describe_one(ctx, filter.to_request()).await
    }

    pub async fn describe_cidrs_by_filter(&self, ctx: &OpContext, filter: &CidrFilter) -> Result<Vec<CidrInfo>> {
        describe_all(ctx, self.client(), filter.to_request()).await
    }

    pub fn cidr_state_refresh<'a>(
        &'a self,
        ctx: &'a OpContext,
        cidr_id: &'a str,
        failed: &'static [&'static str],
    ) -> StateRefreshFunc<'a, CidrInfo> {
        state_refresh(
            format!("CIDR {cidr_id}"),
            move || self.describe_cidr_by_id(ctx, cidr_id),
            |cidr| cidr.status.clone(),
            failed,
        )
    }
}
