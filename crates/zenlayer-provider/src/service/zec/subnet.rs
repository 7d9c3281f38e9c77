use super::ZecService;
use crate::service::{opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, describe_all};
use zenlayer_sdk::zec::{DescribeSubnetsRequest, SubnetInfo};

#[derive(Debug, Clone, Default)]
pub struct SubnetFilter {
    pub ids: Vec<String>,
    pub region_id: String,
    pub vpc_id: String,
    pub cidr_block: String,
    pub name: String,
}

impl SubnetFilter {
    fn to_request(&self) -> DescribeSubnetsRequest {
        DescribeSubnetsRequest {
            subnet_ids: opt_vec(&self.ids),
            region_id: opt(&self.region_id),
            vpc_id: opt(&self.vpc_id),
            cidr_block: opt(&self.cidr_block),
            name: opt(&self.name),
            ..Default::default()
        }
    }
}

impl ZecService {
    pub async fn describe_subnet_by_id(&self, ctx: &OpContext, subnet_id: &str) -> Result<Option<SubnetInfo>> {
        let filter = SubnetFilter {
            ids: vec![subnet_id.to_string()],
            ..Default::default()
        };
        self.describe_one(ctx, filter.to_request()).await
    }

    pub async fn describe_subnets_by_filter(
        &self,
        ctx: &OpContext,
        filter: &SubnetFilter,
    ) -> Result<Vec<SubnetInfo>> {
        describe_all(ctx, self.client(), filter.to_request()).await
    }
}
