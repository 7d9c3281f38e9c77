//! `zenlayercloud_resource_groups`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::user::ResourceGroupFilter;
use async_trait::async_trait;
use serde_json::json;
use zenlayer_cloud::{DataSource, OpContext, ResourceData, ResourceSchema, Result};

pub struct ResourceGroupsDataSource;

#[async_trait]
impl DataSource<ZenlayerClient> for ResourceGroupsDataSource {
    fn type_name(&self) -> &'static str {
        "resource_groups"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "resource_groups", true).with_description("Query resource groups")
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = ResourceGroupFilter {
            ids: d.get_string_list("ids"),
            ..Default::default()
        };
        let groups = meta.user().describe_resource_groups_by_filter(ctx, &filter).await?;
        let entries = groups
            .iter()
            .filter(|group| names.matches(&group.resource_group_name))
            .map(|group| {
                let entry = json!({
                    "id": group.resource_group_id,
                    "name": group.resource_group_name,
                    "description": group.description,
                    "create_time": group.create_time,
                });
                (group.resource_group_id.clone(), entry)
            })
            .collect();
        publish(d, "resource_groups", entries).await
    }
}
