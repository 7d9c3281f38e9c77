//! `zenlayercloud_zec_vpc_security_group_attachment`: id `<vpc>:<security group>`

use super::{forget, kind};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, CompositeId, OpContext, Resource, ResourceData, ResourceSchema, Result,
    parse_pair,
};
use zenlayer_sdk::zec::{AssignVpcSecurityGroupRequest, UnassignVpcSecurityGroupRequest};

pub struct VpcSecurityGroupAttachmentResource;

#[async_trait]
impl Resource<ZenlayerClient> for VpcSecurityGroupAttachmentResource {
    fn type_name(&self) -> &'static str {
        "zec_vpc_security_group_attachment"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Binding of the single security group of a VPC")
            .attribute(AttributeSchema::new("vpc_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("security_group_id", AttributeType::String)
                    .required()
                    .force_new(),
            )
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let vpc_id = d.get_string("vpc_id");
        let security_group_id = d.get_string("security_group_id");
        let request = AssignVpcSecurityGroupRequest {
            vpc_id: vpc_id.clone(),
            security_group_id: security_group_id.clone(),
        };
        meta.zec().send(ctx, &request).await?;
        d.set_id(CompositeId::new([vpc_id.as_str(), security_group_id.as_str()]).encode());
        tracing::info!(vpc_id = %vpc_id, security_group_id = %security_group_id, "security group assigned to VPC");
        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (vpc_id, security_group_id) = parse_pair(d.id())?;
        match meta.zec().describe_vpc_by_id(ctx, &vpc_id).await? {
            Some(vpc) if vpc.security_group_id == security_group_id => {
                d.set("vpc_id", vpc_id);
                d.set("security_group_id", security_group_id);
            }
            _ => forget(d, "VPC security group attachment"),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (vpc_id, _) = parse_pair(d.id())?;
        meta.zec()
            .send_unless_gone(ctx, &UnassignVpcSecurityGroupRequest { vpc_id })
            .await?;
        Ok(())
    }
}
