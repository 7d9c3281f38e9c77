//! `zenlayercloud_zec_disk`

use super::{
    force_delete, forget, forget_in_state, kind, resource_group_id, resource_group_name, update_resource_group,
    wait_recycled, wait_released,
};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, CloudError, OpContext, Resource, ResourceData, ResourceSchema, Result,
    StateChangeConf, Validator, wait_settled,
};
use zenlayer_sdk::zec::{CreateDisksRequest, DeleteDiskRequest, DiskInfo, ModifyDisksAttributesRequest, ResizeDiskRequest};

const DISK_PENDING: &[&str] = &["CREATING", "ATTACHING", "DETACHING", "DELETING", "CHANGING", "RECYCLING"];
const DISK_TARGET: &[&str] = &["AVAILABLE", "IN_USE"];
pub(crate) const DISK_FAILED: &[&str] = &["FAILED"];
const DISK_GONE: &[&str] = &["RECYCLED", "FAILED"];

const MIN_DISK_SIZE: i64 = 20;

pub struct DiskResource;

fn set_disk(d: &mut ResourceData, disk: &DiskInfo) {
    d.set("name", disk.disk_name.as_str());
    d.set("zone_id", disk.zone_id.as_str());
    d.set("disk_size", disk.disk_size);
    d.set("disk_category", disk.disk_category.as_str());
    d.set("disk_type", disk.disk_type.as_str());
    d.set("snapshot_id", disk.snapshot_id.as_str());
    d.set("instance_id", disk.instance_id.as_str());
    d.set("instance_name", disk.instance_name.as_str());
    d.set("status", disk.status.as_str());
    d.set("resource_group_id", disk.resource_group_id.as_str());
    d.set("resource_group_name", disk.resource_group_name.as_str());
    d.set("create_time", disk.create_time.as_str());
}

/// Disks only grow
fn check_resize(old: i64, new: i64) -> Result<()> {
    if new < old {
        return Err(CloudError::validation(format!(
            "disk_size cannot shrink from {old} to {new} GB"
        )));
    }
    Ok(())
}

#[async_trait]
impl Resource<ZenlayerClient> for DiskResource {
    fn type_name(&self) -> &'static str {
        "zec_disk"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Data disk")
            .attribute(AttributeSchema::new("zone_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .validate(Validator::NotEmpty),
            )
            .attribute(
                AttributeSchema::new("disk_size", AttributeType::Int)
                    .required()
                    .validate(Validator::IntAtLeast(MIN_DISK_SIZE))
                    .with_description("Size in GB; can only grow"),
            )
            .attribute(AttributeSchema::new("disk_category", AttributeType::String).optional_computed().force_new())
            .attribute(AttributeSchema::new("snapshot_id", AttributeType::String).force_new())
            .attribute(resource_group_id())
            .attribute(resource_group_name())
            .attribute(force_delete())
            .attribute(AttributeSchema::new("status", AttributeType::String).computed())
            .attribute(AttributeSchema::new("disk_type", AttributeType::String).computed())
            .attribute(AttributeSchema::new("instance_id", AttributeType::String).computed())
            .attribute(AttributeSchema::new("instance_name", AttributeType::String).computed())
            .attribute(AttributeSchema::new("create_time", AttributeType::String).computed())
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = CreateDisksRequest {
            zone_id: d.get_string("zone_id"),
            disk_name: d.get_string("name"),
            disk_size: d.get_i64("disk_size"),
            disk_amount: 1,
            disk_category: d.get_opt_str("disk_category"),
            snapshot_id: d.get_opt_str("snapshot_id"),
            resource_group_id: d.get_opt_str("resource_group_id"),
        };
        let response = meta.zec().send(ctx, &request).await?;
        let Some(disk_id) = response.disk_ids.into_iter().next() else {
            return Err(CloudError::contract("CreateDisks returned no diskIds"));
        };
        d.set_id(&disk_id);
        tracing::info!(disk_id = %disk_id, "creating disk");

        let zec = meta.zec();
        StateChangeConf::new(
            format!("disk {disk_id}"),
            &["CREATING"],
            DISK_TARGET,
            zec.disk_state_refresh(ctx, &disk_id, DISK_FAILED),
            ctx.loop_timeout(),
        )
        .wait(ctx)
        .await?;

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let disk_id = d.id().to_string();
        let refresh = meta.zec().disk_state_refresh(ctx, &disk_id, &[]);
        match wait_settled(ctx, &format!("disk {disk_id}"), DISK_PENDING, refresh).await? {
            None => forget(d, "disk"),
            Some(disk) if DISK_GONE.contains(&disk.status.as_str()) => forget_in_state(d, "disk", &disk.status),
            Some(disk) => set_disk(d, &disk),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let disk_id = d.id().to_string();

        if d.has_change("name") {
            let request = ModifyDisksAttributesRequest {
                disk_ids: vec![disk_id.clone()],
                disk_name: d.get_string("name"),
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(&["name"]);
        }

        if d.has_change("disk_size") {
            let (old, new) = d.get_change("disk_size");
            let new = new.as_i64().unwrap_or_default();
            check_resize(old.as_i64().unwrap_or_default(), new)?;

            let request = ResizeDiskRequest {
                disk_id: disk_id.clone(),
                disk_size: new,
            };
            tracing::info!(disk_id = %disk_id, disk_size = new, "resizing disk");
            meta.zec().send(ctx, &request).await?;

            let zec = meta.zec();
            StateChangeConf::new(
                format!("disk {disk_id}"),
                &["CHANGING"],
                DISK_TARGET,
                zec.disk_state_refresh(ctx, &disk_id, DISK_FAILED),
                ctx.loop_timeout(),
            )
            .wait(ctx)
            .await?;
            d.commit(&["disk_size"]);
        }

        update_resource_group(ctx, meta, d).await?;
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let disk_id = d.id().to_string();
        let request = DeleteDiskRequest {
            disk_id: disk_id.clone(),
        };
        if !meta.zec().send_unless_gone(ctx, &request).await? {
            return Ok(());
        }

        let zec = meta.zec();
        wait_recycled(
            ctx,
            format!("disk {disk_id}"),
            &["DELETING", "RECYCLING"],
            zec.disk_state_refresh(ctx, &disk_id, DISK_FAILED),
        )
        .await?;

        if d.get_bool("force_delete") {
            tracing::info!(disk_id = %disk_id, "releasing disk from the recycle bin");
            if zec.send_unless_gone(ctx, &request).await? {
                wait_released(ctx, format!("disk {disk_id}"), zec.disk_state_refresh(ctx, &disk_id, &[])).await?;
            }
        }
        Ok(())
    }

    fn customize_diff(&self, d: &ResourceData) -> Result<Vec<&'static str>> {
        let (old, new) = d.get_change("disk_size");
        if let (Some(old), Some(new)) = (old.as_i64(), new.as_i64()) {
            check_resize(old, new)?;
        }
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn attrs(value: Value) -> zenlayer_cloud::Attributes {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_shrinking_is_rejected() {
        let d = ResourceData::for_update(
            "disk-1",
            attrs(json!({"disk_size": 40})),
            attrs(json!({"disk_size": 30})),
        );
        assert!(DiskResource.customize_diff(&d).is_err());

        let d = ResourceData::for_update(
            "disk-1",
            attrs(json!({"disk_size": 20})),
            attrs(json!({"disk_size": 40})),
        );
        assert!(DiskResource.customize_diff(&d).unwrap().is_empty());
    }

    #[test]
    fn test_minimum_size() {
        let schema = DiskResource.schema();
        let config = attrs(json!({"zone_id": "asia-east-1a", "name": "data", "disk_size": 10}));
        assert!(schema.validate(&config).is_err());
    }
}
