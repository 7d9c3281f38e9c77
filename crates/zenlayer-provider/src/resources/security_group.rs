//! `zenlayercloud_zec_security_group`

use super::{forget, kind};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, OpContext, Resource, ResourceData, ResourceSchema, Result, Validator,
};
use zenlayer_sdk::zec::{
    CreateSecurityGroupRequest, DeleteSecurityGroupRequest, ModifySecurityGroupsAttributeRequest,
};

pub struct SecurityGroupResource;

#[async_trait]
impl Resource<ZenlayerClient> for SecurityGroupResource {
    fn type_name(&self) -> &'static str {
        "zec_security_group"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Security group; its rules are managed by zec_security_group_rule_set")
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .validate(Validator::NotEmpty),
            )
            .attribute(AttributeSchema::new("description", AttributeType::String))
            .attribute(AttributeSchema::new("is_default", AttributeType::Bool).computed())
            .attribute(AttributeSchema::new("vpc_ids", AttributeType::List).computed())
            .attribute(AttributeSchema::new("instance_ids", AttributeType::List).computed())
            .attribute(AttributeSchema::new("create_time", AttributeType::String).computed())
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = CreateSecurityGroupRequest {
            name: d.get_string("name"),
            description: d.get_opt_str("description"),
        };
        let response = meta.zec().send(ctx, &request).await?;
        d.set_id(&response.security_group_id);
        tracing::info!(security_group_id = %response.security_group_id, "security group created");
        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let security_group_id = d.id().to_string();
        let Some(group) = meta.zec().describe_security_group_by_id(ctx, &security_group_id).await? else {
            forget(d, "security group");
            return Ok(());
        };
        d.set("name", group.security_group_name.as_str());
        d.set("description", group.description.as_str());
        d.set("is_default", group.is_default);
        d.set("vpc_ids", group.vpc_ids.clone());
        d.set("instance_ids", group.instance_ids.clone());
        d.set("create_time", group.create_time.as_str());
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        if d.has_changes(&["name", "description"]) {
            let request = ModifySecurityGroupsAttributeRequest {
                security_group_ids: vec![d.id().to_string()],
                name: Some(d.get_string("name")),
                description: Some(d.get_string("description")),
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(&["name", "description"]);
        }
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = DeleteSecurityGroupRequest {
            security_group_id: d.id().to_string(),
        };
        meta.zec().send_unless_gone(ctx, &request).await?;
        Ok(())
    }
}
