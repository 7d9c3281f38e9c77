//! `zenlayercloud_zec_vnic_attachment`: id `<nic>:<instance>`

use super::{forget, kind};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, CompositeId, OpContext, Resource, ResourceData, ResourceSchema, Result,
    StateChangeConf, parse_pair,
};
use zenlayer_sdk::zec::{AttachNetworkInterfaceRequest, DetachNetworkInterfaceRequest};

use super::vnic::NIC_FAILED;

pub struct VnicAttachmentResource;

#[async_trait]
impl Resource<ZenlayerClient> for VnicAttachmentResource {
    fn type_name(&self) -> &'static str {
        "zec_vnic_attachment"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Attachment of a vNIC to an instance")
            .attribute(AttributeSchema::new("vnic_id", AttributeType::String).required().force_new())
            .attribute(AttributeSchema::new("instance_id", AttributeType::String).required().force_new())
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let nic_id = d.get_string("vnic_id");
        let instance_id = d.get_string("instance_id");
        let request = AttachNetworkInterfaceRequest {
            nic_id: nic_id.clone(),
            instance_id: instance_id.clone(),
        };
        meta.zec().send(ctx, &request).await?;
        d.set_id(CompositeId::new([nic_id.as_str(), instance_id.as_str()]).encode());
        tracing::info!(nic_id = %nic_id, instance_id = %instance_id, "attaching vNIC");

        let zec = meta.zec();
        StateChangeConf::new(
            format!("vNIC {nic_id}"),
            &["ATTACHING", "AVAILABLE"],
            &["USED"],
            zec.nic_state_refresh(ctx, &nic_id, NIC_FAILED),
            ctx.loop_timeout(),
        )
        .wait(ctx)
        .await?;

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (nic_id, instance_id) = parse_pair(d.id())?;
        match meta.zec().describe_nic_by_id(ctx, &nic_id).await? {
            Some(nic) if nic.instance_id == instance_id => {
                d.set("vnic_id", nic_id);
                d.set("instance_id", instance_id);
            }
            _ => forget(d, "vNIC attachment"),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (nic_id, _) = parse_pair(d.id())?;
        let request = DetachNetworkInterfaceRequest { nic_id: nic_id.clone() };
        if !meta.zec().send_unless_gone(ctx, &request).await? {
            return Ok(());
        }

        let zec = meta.zec();
        StateChangeConf::new(
            format!("vNIC {nic_id}"),
            &["DETACHING", "USED"],
            &["AVAILABLE"],
            zec.nic_state_refresh(ctx, &nic_id, NIC_FAILED),
            ctx.loop_timeout(),
        )
        .accept_gone()
        .wait(ctx)
        .await?;
        Ok(())
    }
}
