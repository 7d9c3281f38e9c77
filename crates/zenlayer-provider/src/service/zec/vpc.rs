use super::ZecService;
use crate::service::{opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, describe_all};
use zenlayer_sdk::zec::{DescribeVpcsRequest, VpcInfo};

#[derive(Debug, Clone, Default)]
pub struct VpcFilter {
    pub ids: Vec<String>,
    pub name: String,
    pub cidr_block: String,
    pub resource_group_id: String,
}

impl VpcFilter {
    fn to_request(&self) -> DescribeVpcsRequest {
        DescribeVpcsRequest {
            vpc_ids: opt_vec(&self.ids),
            cidr_block: opt(&self.cidr_block),
            name: opt(&self.name),
            resource_group_id: opt(&self.resource_group_id),
            ..Default::default()
        }
    }
}

impl ZecService {
    pub async fn describe_vpc_by_id(&self, ctx: &OpContext, vpc_id: &str) -> Result<Option<VpcInfo>> {
        let filter = VpcFilter {
            ids: vec![vpc_id.to_string()],
            ..Default::default()
        };
        self.describe_one(ctx, filter.to_request()).await
    }

    pub async fn describe_vpcs_by_filter(&self, ctx: &OpContext, filter: &VpcFilter) -> Result<Vec<VpcInfo>> {
        describe_all(ctx, self.client(), filter.to_request()).await
    }
}
