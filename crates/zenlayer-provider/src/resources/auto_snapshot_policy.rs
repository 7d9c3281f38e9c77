//! `zenlayercloud_zec_auto_snapshot_policy`

use super::{forget, kind, resource_group_id, resource_group_name, update_resource_group};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use serde_json::Value;
use zenlayer_cloud::{
    Attributes, AttributeSchema, AttributeType, CloudError, OpContext, Resource, ResourceData, ResourceSchema,
    Result, Rule, Validator,
};
use zenlayer_sdk::zec::{
    AutoSnapshotPolicyInfo, CreateAutoSnapshotPolicyRequest, DeleteAutoSnapshotPolicyRequest,
    ModifyAutoSnapshotPolicyRequest,
};

pub struct AutoSnapshotPolicyResource;

/// `-1` keeps snapshots forever
fn check_retention_days(config: &Attributes) -> std::result::Result<(), String> {
    match config.get("retention_days").and_then(Value::as_i64) {
        Some(days) if days != -1 && days < 1 => Err(format!(
            "retention_days must be -1 (keep forever) or at least 1, got {days}"
        )),
        _ => Ok(()),
    }
}

fn set_policy(d: &mut ResourceData, policy: &AutoSnapshotPolicyInfo) {
    d.set("name", policy.name.as_str());
    d.set("zone_id", policy.zone_id.as_str());
    d.set("repeat_week_days", policy.repeat_week_days.clone());
    d.set("hours", policy.hours.clone());
    d.set("retention_days", policy.retention_days);
    d.set("disk_ids", policy.disk_ids.clone());
    d.set("resource_group_id", policy.resource_group_id.as_str());
    d.set("resource_group_name", policy.resource_group_name.as_str());
    d.set("create_time", policy.create_time.as_str());
}

#[async_trait]
impl Resource<ZenlayerClient> for AutoSnapshotPolicyResource {
    fn type_name(&self) -> &'static str {
        "zec_auto_snapshot_policy"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Schedule for automatic disk snapshots")
            .attribute(AttributeSchema::new("zone_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .validate(Validator::NotEmpty),
            )
            .attribute(
                AttributeSchema::new("repeat_week_days", AttributeType::Set)
                    .required()
                    .validate(Validator::IntBetween(1, 7))
                    .with_description("Days of the week, 1 (Monday) to 7 (Sunday)"),
            )
            .attribute(
                AttributeSchema::new("hours", AttributeType::Set)
                    .required()
                    .validate(Validator::IntBetween(0, 23)),
            )
            .attribute(AttributeSchema::new("retention_days", AttributeType::Int).optional_computed())
            .attribute(resource_group_id())
            .attribute(resource_group_name())
            .attribute(AttributeSchema::new("disk_ids", AttributeType::Set).computed())
            .attribute(AttributeSchema::new("create_time", AttributeType::String).computed())
            .rule(Rule::Custom(check_retention_days))
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = CreateAutoSnapshotPolicyRequest {
            zone_id: d.get_string("zone_id"),
            name: d.get_string("name"),
            repeat_week_days: d.get_i64_list("repeat_week_days"),
            hours: d.get_i64_list("hours"),
            retention_days: d.get_opt_i64("retention_days"),
            resource_group_id: d.get_opt_str("resource_group_id"),
        };
        let response = meta.zec().send(ctx, &request).await?;
        if response.auto_snapshot_policy_id.is_empty() {
            return Err(CloudError::contract("CreateAutoSnapshotPolicy returned no autoSnapshotPolicyId"));
        }
        d.set_id(&response.auto_snapshot_policy_id);
        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        match meta.zec().describe_auto_snapshot_policy_by_id(ctx, d.id()).await? {
            Some(policy) => set_policy(d, &policy),
            None => forget(d, "auto snapshot policy"),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        const FIELDS: &[&str] = &["name", "repeat_week_days", "hours", "retention_days"];
        if d.has_changes(FIELDS) {
            let request = ModifyAutoSnapshotPolicyRequest {
                auto_snapshot_policy_id: d.id().to_string(),
                name: d.has_change("name").then(|| d.get_string("name")),
                repeat_week_days: d.has_change("repeat_week_days").then(|| d.get_i64_list("repeat_week_days")),
                hours: d.has_change("hours").then(|| d.get_i64_list("hours")),
                retention_days: d.has_change("retention_days").then(|| d.get_i64("retention_days")),
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(FIELDS);
        }

        update_resource_group(ctx, meta, d).await?;
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = DeleteAutoSnapshotPolicyRequest {
            auto_snapshot_policy_id: d.id().to_string(),
        };
        meta.zec().send_unless_gone(ctx, &request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(hours: Value, days: Value, retention: Value) -> Attributes {
        json!({
            "zone_id": "asia-east-1a",
            "name": "nightly",
            "hours": hours,
            "repeat_week_days": days,
            "retention_days": retention,
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_schedule_bounds() {
        let schema = AutoSnapshotPolicyResource.schema();
        assert!(schema.validate(&config(json!([0, 23]), json!([1, 7]), json!(7))).is_ok());
        assert!(schema.validate(&config(json!([24]), json!([1]), json!(7))).is_err());
        assert!(schema.validate(&config(json!([3]), json!([0]), json!(7))).is_err());
        assert!(schema.validate(&config(json!([3]), json!([8]), json!(7))).is_err());
    }

    #[test]
    fn test_retention_days() {
        let schema = AutoSnapshotPolicyResource.schema();
        assert!(schema.validate(&config(json!([3]), json!([1]), json!(-1))).is_ok());
        assert!(schema.validate(&config(json!([3]), json!([1]), json!(0))).is_err());
    }
}
