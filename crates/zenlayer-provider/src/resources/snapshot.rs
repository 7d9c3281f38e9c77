//! `zenlayercloud_zec_snapshot`

use super::{forget, forget_in_state, kind, resource_group_id, resource_group_name, update_resource_group};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use zenlayer_cloud::{
    AttributeSchema, AttributeType, CloudError, OpContext, Resource, ResourceData, ResourceSchema, Result,
    StateChangeConf, Validator, wait_settled,
};
use zenlayer_sdk::zec::{CreateSnapshotRequest, DeleteSnapshotsRequest, ModifySnapshotsAttributeRequest, SnapshotInfo};

const SNAPSHOT_PENDING: &[&str] = &["CREATING"];
const SNAPSHOT_FAILED: &[&str] = &["FAILED"];

/// Minimum lifetime of a snapshot with a retention time, in hours
const MIN_RETENTION_HOURS: i64 = 24;

pub struct SnapshotResource;

/// `retention_time` must lie at least a day ahead of `now`
fn check_retention_time(value: &str, now: DateTime<Utc>) -> Result<()> {
    let at = DateTime::parse_from_rfc3339(value)
        .map_err(|e| CloudError::validation(format!("retention_time {value:?} is not RFC 3339: {e}")))?;
    if at.with_timezone(&Utc) < now + TimeDelta::hours(MIN_RETENTION_HOURS) {
        return Err(CloudError::validation(format!(
            "retention_time {value} must be at least 24 hours in the future"
        )));
    }
    Ok(())
}

fn set_snapshot(d: &mut ResourceData, snapshot: &SnapshotInfo) {
    d.set("name", snapshot.snapshot_name.as_str());
    d.set("disk_id", snapshot.disk_id.as_str());
    d.set("zone_id", snapshot.zone_id.as_str());
    d.set("status", snapshot.status.as_str());
    d.set("snapshot_type", snapshot.snapshot_type.as_str());
    d.set("retention_time", snapshot.retention_time.as_str());
    d.set("resource_group_id", snapshot.resource_group_id.as_str());
    d.set("resource_group_name", snapshot.resource_group_name.as_str());
    d.set("create_time", snapshot.create_time.as_str());
}

#[async_trait]
impl Resource<ZenlayerClient> for SnapshotResource {
    fn type_name(&self) -> &'static str {
        "zec_snapshot"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Disk snapshot")
            .attribute(AttributeSchema::new("disk_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .validate(Validator::NotEmpty),
            )
            .attribute(
                AttributeSchema::new("retention_time", AttributeType::String)
                    .optional_computed()
                    .validate(Validator::Rfc3339)
                    .with_description("Expiry in UTC, e.g. 2030-01-02T15:04:05Z; at least 24 hours ahead"),
            )
            .attribute(resource_group_id())
            .attribute(resource_group_name())
            .attribute(AttributeSchema::new("status", AttributeType::String).computed())
            .attribute(AttributeSchema::new("zone_id", AttributeType::String).computed())
            .attribute(AttributeSchema::new("snapshot_type", AttributeType::String).computed())
            .attribute(AttributeSchema::new("create_time", AttributeType::String).computed())
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let retention_time = d.get_opt_str("retention_time");
        if let Some(value) = &retention_time {
            check_retention_time(value, Utc::now())?;
        }

        let request = CreateSnapshotRequest {
            disk_id: d.get_string("disk_id"),
            snapshot_name: d.get_string("name"),
            retention_time,
            resource_group_id: d.get_opt_str("resource_group_id"),
        };
        let response = meta.zec().send(ctx, &request).await?;
        if response.snapshot_id.is_empty() {
            return Err(CloudError::contract("CreateSnapshot returned no snapshotId"));
        }
        let snapshot_id = response.snapshot_id;
        d.set_id(&snapshot_id);
        tracing::info!(snapshot_id = %snapshot_id, "creating snapshot");

        let zec = meta.zec();
        StateChangeConf::new(
            format!("snapshot {snapshot_id}"),
            SNAPSHOT_PENDING,
            &["AVAILABLE"],
            zec.snapshot_state_refresh(ctx, &snapshot_id, SNAPSHOT_FAILED),
            ctx.loop_timeout(),
        )
        .wait(ctx)
        .await?;

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let snapshot_id = d.id().to_string();
        let refresh = meta.zec().snapshot_state_refresh(ctx, &snapshot_id, &[]);
        match wait_settled(ctx, &format!("snapshot {snapshot_id}"), SNAPSHOT_PENDING, refresh).await? {
            None => forget(d, "snapshot"),
            Some(s) if SNAPSHOT_FAILED.contains(&s.status.as_str()) || s.status == "DELETING" => {
                forget_in_state(d, "snapshot", &s.status)
            }
            Some(s) => set_snapshot(d, &s),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let snapshot_id = d.id().to_string();

        let retention_changed = d.has_change("retention_time");
        if retention_changed {
            if let Some(value) = d.get_opt_str("retention_time") {
                check_retention_time(&value, Utc::now())?;
            }
        }

        if d.has_change("name") || retention_changed {
            let request = ModifySnapshotsAttributeRequest {
                snapshot_ids: vec![snapshot_id.clone()],
                snapshot_name: Some(d.get_string("name")),
                retention_time: if retention_changed {
                    d.get_opt_str("retention_time")
                } else {
                    None
                },
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(&["name", "retention_time"]);
        }

        update_resource_group(ctx, meta, d).await?;
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let snapshot_id = d.id().to_string();
        let request = DeleteSnapshotsRequest {
            snapshot_ids: vec![snapshot_id.clone()],
        };
        if !meta.zec().send_unless_gone(ctx, &request).await? {
            return Ok(());
        }

        let zec = meta.zec();
        StateChangeConf::new(
            format!("snapshot {snapshot_id}"),
            &["DELETING", "AVAILABLE"],
            &[],
            zec.snapshot_state_refresh(ctx, &snapshot_id, SNAPSHOT_FAILED),
            ctx.loop_timeout(),
        )
        .wait(ctx)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retention_time_must_be_a_day_ahead() {
        let now = DateTime::parse_from_rfc3339("2030-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(check_retention_time("2030-01-01T12:00:00Z", now).is_err());
        assert!(check_retention_time("2030-01-02T00:00:00Z", now).is_ok());
        assert!(check_retention_time("2030-01-05T00:00:00Z", now).is_ok());
        assert!(check_retention_time("tomorrow", now).is_err());
    }
}
