//! `zenlayercloud_zec_nat_gateway`

use super::{
    force_delete, forget, forget_in_state, kind, resource_group_id, resource_group_name, update_resource_group,
    wait_recycled, wait_released,
};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, CloudError, OpContext, Resource, ResourceData, ResourceSchema, Result, Rule,
    StateChangeConf, Validator, wait_settled,
};
use zenlayer_sdk::zec::{
    CreateNatGatewayRequest, DeleteNatGatewayRequest, ModifyNatGatewayAttributeRequest,
    ModifyNatGatewayIcmpReplyRequest, NatGatewayInfo,
};

const NAT_PENDING: &[&str] = &["CREATING", "RELEASING"];
const NAT_FAILED: &[&str] = &["CREATE_FAILED"];
const NAT_GONE: &[&str] = &["CREATE_FAILED", "RECYCLED"];

/// Attributes covered by `ModifyNatGatewayAttribute`
const MODIFIABLE: &[&str] = &["name", "subnet_ids", "is_all_subnets", "security_group_id"];

pub struct NatGatewayResource;

fn set_nat_gateway(d: &mut ResourceData, nat: &NatGatewayInfo) {
    d.set("name", nat.name.as_str());
    d.set("region_id", nat.region_id.as_str());
    d.set("vpc_id", nat.vpc_id.as_str());
    if nat.is_all_subnets {
        d.set("is_all_subnets", true);
        d.set("subnet_ids", Vec::<String>::new());
    } else {
        d.set("is_all_subnets", false);
        d.set("subnet_ids", nat.subnet_ids.clone());
    }
    d.set("eip_ids", nat.eip_ids.clone());
    d.set("security_group_id", nat.security_group_id.as_str());
    d.set("icmp_reply_enabled", nat.icmp_reply_enabled);
    d.set("zbg_id", nat.zbg_id.as_str());
    d.set("status", nat.status.as_str());
    d.set("resource_group_id", nat.resource_group_id.as_str());
    d.set("resource_group_name", nat.resource_group_name.as_str());
    d.set("create_time", nat.create_time.as_str());
}

fn subnet_selection(d: &ResourceData) -> (Option<Vec<String>>, Option<bool>) {
    if d.get_bool("is_all_subnets") {
        (None, Some(true))
    } else {
        (Some(d.get_string_list("subnet_ids")), None)
    }
}

#[async_trait]
impl Resource<ZenlayerClient> for NatGatewayResource {
    fn type_name(&self) -> &'static str {
        "zec_nat_gateway"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("NAT gateway of a VPC in one region")
            .attribute(AttributeSchema::new("region_id", AttributeType::String).required().force_new())
            .attribute(AttributeSchema::new("vpc_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .validate(Validator::NotEmpty),
            )
            .attribute(AttributeSchema::new("subnet_ids", AttributeType::Set))
            .attribute(
                AttributeSchema::new("is_all_subnets", AttributeType::Bool)
                    .with_description("Serve every subnet of the VPC"),
            )
            .attribute(AttributeSchema::new("security_group_id", AttributeType::String).optional_computed())
            .attribute(AttributeSchema::new("icmp_reply_enabled", AttributeType::Bool).default_value(false))
            .attribute(resource_group_id())
            .attribute(resource_group_name())
            .attribute(force_delete())
            .attribute(AttributeSchema::new("eip_ids", AttributeType::List).computed())
            .attribute(AttributeSchema::new("zbg_id", AttributeType::String).computed())
            .attribute(AttributeSchema::new("status", AttributeType::String).computed())
            .attribute(AttributeSchema::new("create_time", AttributeType::String).computed())
            .rule(Rule::ExactlyOneOf(&["subnet_ids", "is_all_subnets"]))
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (subnet_ids, is_all_subnets) = subnet_selection(d);
        let request = CreateNatGatewayRequest {
            region_id: d.get_string("region_id"),
            vpc_id: d.get_string("vpc_id"),
            name: d.get_string("name"),
            subnet_ids,
            is_all_subnets,
            security_group_id: d.get_opt_str("security_group_id"),
            resource_group_id: d.get_opt_str("resource_group_id"),
        };
        let response = meta.zec().send(ctx, &request).await?;
        let nat_gateway_id = response.nat_gateway_id;
        if nat_gateway_id.is_empty() {
            return Err(CloudError::contract("CreateNatGateway returned no natGatewayId"));
        }
        d.set_id(&nat_gateway_id);
        tracing::info!(nat_gateway_id = %nat_gateway_id, "creating NAT gateway");

        let zec = meta.zec();
        StateChangeConf::new(
            format!("NAT gateway {nat_gateway_id}"),
            &["CREATING"],
            &["RUNNING"],
            zec.nat_gateway_state_refresh(ctx, &nat_gateway_id, NAT_FAILED),
            ctx.loop_timeout(),
        )
        .wait(ctx)
        .await?;

        // Not accepted by CreateNatGateway
        if d.get_bool("icmp_reply_enabled") {
            let request = ModifyNatGatewayIcmpReplyRequest {
                nat_gateway_id: nat_gateway_id.clone(),
                icmp_reply_enabled: true,
            };
            zec.send(ctx, &request).await?;
        }

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let nat_gateway_id = d.id().to_string();
        let refresh = meta.zec().nat_gateway_state_refresh(ctx, &nat_gateway_id, &[]);
        match wait_settled(ctx, &format!("NAT gateway {nat_gateway_id}"), NAT_PENDING, refresh).await? {
            None => forget(d, "NAT gateway"),
            Some(nat) if NAT_GONE.contains(&nat.status.as_str()) => forget_in_state(d, "NAT gateway", &nat.status),
            Some(nat) => set_nat_gateway(d, &nat),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let nat_gateway_id = d.id().to_string();

        if d.has_changes(MODIFIABLE) {
            let mut request = ModifyNatGatewayAttributeRequest {
                nat_gateway_id: nat_gateway_id.clone(),
                ..Default::default()
            };
            if d.has_change("name") {
                request.name = Some(d.get_string("name"));
            }
            if d.has_changes(&["subnet_ids", "is_all_subnets"]) {
                let (subnet_ids, is_all_subnets) = subnet_selection(d);
                request.subnet_ids = subnet_ids;
                request.is_all_subnets = is_all_subnets;
            }
            if d.has_change("security_group_id") {
                request.security_group_id = d.get_opt_str("security_group_id");
            }
            meta.zec().send(ctx, &request).await?;
            d.commit(MODIFIABLE);
        }

        if d.has_change("icmp_reply_enabled") {
            let request = ModifyNatGatewayIcmpReplyRequest {
                nat_gateway_id: nat_gateway_id.clone(),
                icmp_reply_enabled: d.get_bool("icmp_reply_enabled"),
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(&["icmp_reply_enabled"]);
        }

        update_resource_group(ctx, meta, d).await?;
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let nat_gateway_id = d.id().to_string();
        let request = DeleteNatGatewayRequest {
            nat_gateway_id: nat_gateway_id.clone(),
        };
        let zec = meta.zec();
        if !zec.send_unless_gone(ctx, &request).await? {
            return Ok(());
        }

        wait_recycled(
            ctx,
            format!("NAT gateway {nat_gateway_id}"),
            &["RUNNING", "RELEASING", "RECYCLING"],
            zec.nat_gateway_state_refresh(ctx, &nat_gateway_id, &[]),
        )
        .await?;

        if d.get_bool("force_delete") && zec.send_unless_gone(ctx, &request).await? {
            wait_released(
                ctx,
                format!("NAT gateway {nat_gateway_id}"),
                zec.nat_gateway_state_refresh(ctx, &nat_gateway_id, &[]),
            )
            .await?;
        }
        Ok(())
    }
}
