//! `zenlayercloud_zec_auto_snapshot_policies`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::zec::AutoSnapshotPolicyFilter;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::{AttributeSchema, AttributeType, DataSource, OpContext, ResourceData, ResourceSchema, Result};
use zenlayer_sdk::zec::AutoSnapshotPolicyInfo;

pub struct AutoSnapshotPoliciesDataSource;

fn project(policy: &AutoSnapshotPolicyInfo) -> Value {
    json!({
        "id": policy.auto_snapshot_policy_id,
        "name": policy.name,
        "zone_id": policy.zone_id,
        "repeat_week_days": policy.repeat_week_days,
        "hours": policy.hours,
        "retention_days": policy.retention_days,
        "disk_ids": policy.disk_ids,
        "disk_num": policy.disk_num,
        "resource_group_id": policy.resource_group_id,
        "resource_group_name": policy.resource_group_name,
        "create_time": policy.create_time,
    })
}

#[async_trait]
impl DataSource<ZenlayerClient> for AutoSnapshotPoliciesDataSource {
    fn type_name(&self) -> &'static str {
        "zec_auto_snapshot_policies"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "policies", true)
            .with_description("Query automatic snapshot policies")
            .attribute(AttributeSchema::new("zone_id", AttributeType::String))
            .attribute(AttributeSchema::new("resource_group_id", AttributeType::String))
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = AutoSnapshotPolicyFilter {
            ids: d.get_string_list("ids"),
            zone_id: d.get_string("zone_id"),
            resource_group_id: d.get_string("resource_group_id"),
            ..Default::default()
        };
        let policies = meta.zec().describe_auto_snapshot_policies_by_filter(ctx, &filter).await?;
        let entries = policies
            .iter()
            .filter(|policy| names.matches(&policy.name))
            .map(|policy| (policy.auto_snapshot_policy_id.clone(), project(policy)))
            .collect();
        publish(d, "policies", entries).await
    }
}
