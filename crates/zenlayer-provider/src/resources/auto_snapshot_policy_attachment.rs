//! `zenlayercloud_zec_auto_snapshot_policy_attachment`: id `<policy>:<disk>`

use super::{forget, kind};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, CompositeId, OpContext, Resource, ResourceData, ResourceSchema, Result,
    parse_pair,
};
use zenlayer_sdk::zec::{ApplyAutoSnapshotPolicyRequest, CancelAutoSnapshotPolicyRequest};

pub struct AutoSnapshotPolicyAttachmentResource;

#[async_trait]
impl Resource<ZenlayerClient> for AutoSnapshotPolicyAttachmentResource {
    fn type_name(&self) -> &'static str {
        "zec_auto_snapshot_policy_attachment"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Application of an auto snapshot policy to a disk")
            .attribute(
                AttributeSchema::new("auto_snapshot_policy_id", AttributeType::String)
                    .required()
                    .force_new(),
            )
            .attribute(AttributeSchema::new("disk_id", AttributeType::String).required().force_new())
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let policy_id = d.get_string("auto_snapshot_policy_id");
        let disk_id = d.get_string("disk_id");
        let request = ApplyAutoSnapshotPolicyRequest {
            auto_snapshot_policy_id: policy_id.clone(),
            disk_ids: vec![disk_id.clone()],
        };
        meta.zec().send(ctx, &request).await?;
        d.set_id(CompositeId::new([policy_id, disk_id]).encode());
        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (policy_id, disk_id) = parse_pair(d.id())?;
        match meta.zec().describe_auto_snapshot_policy_by_id(ctx, &policy_id).await? {
            Some(policy) if policy.disk_ids.contains(&disk_id) => {
                d.set("auto_snapshot_policy_id", policy_id);
                d.set("disk_id", disk_id);
            }
            _ => forget(d, "auto snapshot policy attachment"),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (_, disk_id) = parse_pair(d.id())?;
        let request = CancelAutoSnapshotPolicyRequest {
            disk_ids: vec![disk_id],
        };
        meta.zec().send_unless_gone(ctx, &request).await?;
        Ok(())
    }
}
