//! `zenlayercloud_zec_disk_attachment`: id `<disk>:<instance>`

use super::disk::DISK_FAILED;
use super::{forget, kind};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, CompositeId, OpContext, Resource, ResourceData, ResourceSchema, Result,
    StateChangeConf, parse_pair,
};
use zenlayer_sdk::zec::{AttachDisksRequest, DetachDisksRequest};

pub struct DiskAttachmentResource;

#[async_trait]
impl Resource<ZenlayerClient> for DiskAttachmentResource {
    fn type_name(&self) -> &'static str {
        "zec_disk_attachment"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Attachment of a data disk to an instance")
            .attribute(AttributeSchema::new("disk_id", AttributeType::String).required().force_new())
            .attribute(AttributeSchema::new("instance_id", AttributeType::String).required().force_new())
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let disk_id = d.get_string("disk_id");
        let instance_id = d.get_string("instance_id");
        let request = AttachDisksRequest {
            disk_ids: vec![disk_id.clone()],
            instance_id: instance_id.clone(),
        };
        meta.zec().send(ctx, &request).await?;
        d.set_id(CompositeId::new([disk_id.as_str(), instance_id.as_str()]).encode());
        tracing::info!(disk_id = %disk_id, instance_id = %instance_id, "attaching disk");

        let zec = meta.zec();
        StateChangeConf::new(
            format!("disk {disk_id}"),
            &["ATTACHING", "AVAILABLE"],
            &["IN_USE"],
            zec.disk_state_refresh(ctx, &disk_id, DISK_FAILED),
            ctx.loop_timeout(),
        )
        .wait(ctx)
        .await?;

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (disk_id, instance_id) = parse_pair(d.id())?;
        match meta.zec().describe_disk_by_id(ctx, &disk_id).await? {
            Some(disk) if disk.instance_id == instance_id => {
                d.set("disk_id", disk_id);
                d.set("instance_id", instance_id);
            }
            _ => forget(d, "disk attachment"),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (disk_id, _) = parse_pair(d.id())?;
        let request = DetachDisksRequest {
            disk_ids: vec![disk_id.clone()],
        };
        if !meta.zec().send_unless_gone(ctx, &request).await? {
            return Ok(());
        }

        let zec = meta.zec();
        StateChangeConf::new(
            format!("disk {disk_id}"),
            &["DETACHING", "IN_USE"],
            &["AVAILABLE"],
            zec.disk_state_refresh(ctx, &disk_id, DISK_FAILED),
            ctx.loop_timeout(),
        )
        .accept_gone()
        .wait(ctx)
        .await?;
        Ok(())
    }
}
