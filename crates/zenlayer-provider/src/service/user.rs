//! User service: resource groups

use super::{call, opt, opt_vec};
use zenlayer_cloud::{OpContext, Result, describe_all};
use zenlayer_sdk::ApiClient;
use zenlayer_sdk::user::{AddResourceResourceGroupRequest, DescribeResourceGroupsRequest, ResourceGroupInfo};

#[derive(Debug, Clone, Default)]
pub struct ResourceGroupFilter {
    pub ids: Vec<String>,
    pub name: String,
}

#[derive(Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Move resources into a resource group
    pub async fn add_resource_resource_group(
        &self,
        ctx: &OpContext,
        resource_group_id: &str,
        resources: &[&str],
    ) -> Result<()> {
        tracing::info!(resource_group_id, ?resources, "moving resources to resource group");
        let request = AddResourceResourceGroupRequest {
            resource_group_id: resource_group_id.to_string(),
            resources: resources.iter().map(|r| r.to_string()).collect(),
        };
        call(&self.client, ctx, &request, &[]).await?;
        Ok(())
    }

    pub async fn describe_resource_groups_by_filter(
        &self,
        ctx: &OpContext,
        filter: &ResourceGroupFilter,
    ) -> Result<Vec<ResourceGroupInfo>> {
        let request = DescribeResourceGroupsRequest {
            resource_group_ids: opt_vec(&filter.ids),
            name: opt(&filter.name),
            ..Default::default()
        };
        describe_all(ctx, &self.client, request).await
    }
}
