//! `zenlayercloud_zec_vpc`

use super::{forget, kind, resource_group_id, resource_group_name, update_resource_group};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use serde_json::Value;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, CloudError, OpContext, Resource, ResourceData, ResourceSchema, Result,
    Validator,
};
use zenlayer_sdk::zec::{CreateVpcRequest, DeleteVpcRequest, ModifyVpcAttributeRequest, VpcInfo};

pub struct VpcResource;

fn set_vpc(d: &mut ResourceData, vpc: &VpcInfo) {
    d.set("name", vpc.name.as_str());
    d.set("cidr_block", vpc.cidr_block.as_str());
    d.set("mtu", vpc.mtu);
    d.set("enable_ipv6", !vpc.ipv6_cidr_block.is_empty());
    d.set("ipv6_cidr_block", vpc.ipv6_cidr_block.as_str());
    d.set("is_default", vpc.is_default);
    d.set("security_group_id", vpc.security_group_id.as_str());
    d.set("resource_group_id", vpc.resource_group_id.as_str());
    d.set("resource_group_name", vpc.resource_group_name.as_str());
    d.set("create_time", vpc.create_time.as_str());
}

#[async_trait]
impl Resource<ZenlayerClient> for VpcResource {
    fn type_name(&self) -> &'static str {
        "zec_vpc"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Global VPC")
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .validate(Validator::NotEmpty),
            )
            .attribute(
                AttributeSchema::new("cidr_block", AttributeType::String)
                    .required()
                    .force_new()
                    .validate(Validator::Cidr),
            )
            .attribute(
                AttributeSchema::new("enable_ipv6", AttributeType::Bool)
                    .default_value(false)
                    .with_description("Can be turned on in place; turning it off recreates the VPC"),
            )
            .attribute(
                AttributeSchema::new("mtu", AttributeType::Int)
                    .default_value(1500)
                    .force_new()
                    .validate(Validator::IntBetween(1300, 1500)),
            )
            .attribute(resource_group_id())
            .attribute(resource_group_name())
            .attribute(AttributeSchema::new("ipv6_cidr_block", AttributeType::String).computed())
            .attribute(AttributeSchema::new("is_default", AttributeType::Bool).computed())
            .attribute(AttributeSchema::new("security_group_id", AttributeType::String).computed())
            .attribute(AttributeSchema::new("create_time", AttributeType::String).computed())
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = CreateVpcRequest {
            name: d.get_string("name"),
            cidr_block: d.get_string("cidr_block"),
            mtu: d.get_opt_i64("mtu"),
            resource_group_id: d.get_opt_str("resource_group_id"),
        };
        let response = meta.zec().send(ctx, &request).await?;
        if response.vpc_id.is_empty() {
            return Err(CloudError::contract("CreateVpc returned no vpcId"));
        }
        d.set_id(&response.vpc_id);
        tracing::info!(vpc_id = %response.vpc_id, "created VPC");

        if d.get_bool("enable_ipv6") {
            let request = ModifyVpcAttributeRequest {
                vpc_id: response.vpc_id.clone(),
                enable_ipv6: Some(true),
                ..Default::default()
            };
            meta.zec().send(ctx, &request).await?;
        }

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        match meta.zec().describe_vpc_by_id(ctx, d.id()).await? {
            Some(vpc) => set_vpc(d, &vpc),
            None => forget(d, "VPC"),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let vpc_id = d.id().to_string();

        if d.has_change("name") {
            let request = ModifyVpcAttributeRequest {
                vpc_id: vpc_id.clone(),
                name: Some(d.get_string("name")),
                ..Default::default()
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(&["name"]);
        }

        if d.has_change("enable_ipv6") && d.get_bool("enable_ipv6") {
            let request = ModifyVpcAttributeRequest {
                vpc_id: vpc_id.clone(),
                enable_ipv6: Some(true),
                ..Default::default()
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(&["enable_ipv6"]);
        }

        update_resource_group(ctx, meta, d).await?;
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = DeleteVpcRequest {
            vpc_id: d.id().to_string(),
        };
        if !meta.zec().send_unless_gone(ctx, &request).await? {
            tracing::debug!(vpc_id = d.id(), "VPC already gone");
        }
        Ok(())
    }

    fn customize_diff(&self, d: &ResourceData) -> Result<Vec<&'static str>> {
        // IPv6 cannot be revoked from a VPC
        match d.get_change("enable_ipv6") {
            (Value::Bool(true), Value::Bool(false)) => Ok(vec!["enable_ipv6"]),
            _ => Ok(Vec::new()),
        }
    }
}
