use super::ZecService;
use crate::service::{opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, describe_all};
use zenlayer_sdk::zec::{DescribeSecurityGroupsRequest, SecurityGroupInfo};

#[derive(Debug, Clone, Default)]
pub struct SecurityGroupFilter {
    pub ids: Vec<String>,
    pub name: String,
}

impl SecurityGroupFilter {
    fn to_request(&self) -> DescribeSecurityGroupsRequest {
        DescribeSecurityGroupsRequest {
            security_group_ids: opt_vec(&self.ids),
            name: opt(&self.name),
            ..Default::default()
        }
    }
}

impl ZecService {
    pub async fn describe_security_group_by_id(
        &self,
        ctx: &OpContext,
        security_group_id: &str,
    ) -> Result<Option<SecurityGroupInfo>> {
        let filter = SecurityGroupFilter {
            ids: vec![security_group_id.to_string()],
            ..Default::default()
        };
        self.describe_one(ctx, filter.to_request()).await
    }

    pub async fn describe_security_groups_by_filter(
        &self,
        ctx: &OpContext,
        filter: &SecurityGroupFilter,
    ) -> Result<Vec<SecurityGroupInfo>> {
        describe_all(ctx, self.client(), filter.to_request()).await
    }
}
