//! `zenlayercloud_zec_cidr`: a block of public addresses reserved for EIPs

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
use zenlayer_sdk::zec::{CidrInfo, CreateCidrRequest, DeleteCidrRequest, ModifyCidrAttributeRequest};

const CIDR_PENDING: &[&str] = &["CREATING", "DELETING", "RECYCLING"];
const CIDR_FAILED: &[&str] = &["FAILED"];
const CIDR_GONE: &[&str] = &["FAILED", "RECYCLED"];

pub struct CidrResource;

fn set_cidr(d: &mut ResourceData, cidr: &CidrInfo) {
    d.set("name", cidr.name.as_str());
    d.set("region_id", cidr.region_id.as_str());
    d.set("netmask", cidr.netmask);
    d.set("network_type", cidr.network_type.as_str());
    d.set("cidr_block", cidr.cidr_block.as_str());
    d.set("status", cidr.status.as_str());
    d.set("used_count", cidr.used_count);
    d.set("resource_group_id", cidr.resource_group_id.as_str());
    d.set("resource_group_name", cidr.resource_group_name.as_str());
    d.set("create_time", cidr.create_time.as_str());
    d.set("expired_time", cidr.expired_time.as_str());
}

#[async_trait]
impl Resource<ZenlayerClient> for CidrResource {
    fn type_name(&self) -> &'static str {
        "zec_cidr"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Public IPv4 CIDR block")
            .attribute(AttributeSchema::new("region_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .validate(Validator::NotEmpty),
            )
            .attribute(
                AttributeSchema::new("netmask", AttributeType::Int)
                    .required()
                    .force_new()
                    .validate(Validator::IntBetween(27, 30)),
            )
            .attribute(AttributeSchema::new("network_type", AttributeType::String).required().force_new())
            .attribute(resource_group_id())
            .attribute(resource_group_name())
            .attribute(force_delete())
            .attribute(AttributeSchema::new("cidr_block", AttributeType::String).computed())
            .attribute(AttributeSchema::new("status", AttributeType::String).computed())
            .attribute(AttributeSchema::new("used_count", AttributeType::Int).computed())
            .attribute(AttributeSchema::new("create_time", AttributeType::String).computed())
            .attribute(AttributeSchema::new("expired_time", AttributeType::String).computed())
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = CreateCidrRequest {
            region_id: d.get_string("region_id"),
            name: d.get_string("name"),
            netmask: d.get_i64("netmask"),
            network_type: d.get_string("network_type"),
            amount: 1,
            resource_group_id: d.get_opt_str("resource_group_id"),
        };
        let response = meta.zec().send(ctx, &request).await?;
        let Some(cidr_id) = response.cidr_ids.into_iter().next() else {
            return Err(CloudError::contract("CreateCidr returned no cidrIds"));
        };
        d.set_id(&cidr_id);
        tracing::info!(cidr_id = %cidr_id, "creating CIDR");

        let zec = meta.zec();
        StateChangeConf::new(
            format!("CIDR {cidr_id}"),
            &["CREATING"],
            &["AVAILABLE"],
            zec.cidr_state_refresh(ctx, &cidr_id, CIDR_FAILED),
            ctx.loop_timeout(),
        )
        .wait(ctx)
        .await?;

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let cidr_id = d.id().to_string();
        let refresh = meta.zec().cidr_state_refresh(ctx, &cidr_id, &[]);
        match wait_settled(ctx, &format!("CIDR {cidr_id}"), CIDR_PENDING, refresh).await? {
            None => forget(d, "CIDR"),
            Some(cidr) if CIDR_GONE.contains(&cidr.status.as_str()) => forget_in_state(d, "CIDR", &cidr.status),
            Some(cidr) => set_cidr(d, &cidr),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        if d.has_change("name") {
            let request = ModifyCidrAttributeRequest {
                cidr_id: d.id().to_string(),
                name: d.get_string("name"),
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(&["name"]);
        }

        update_resource_group(ctx, meta, d).await?;
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let cidr_id = d.id().to_string();
        let request = DeleteCidrRequest {
            cidr_id: cidr_id.clone(),
        };
        if !meta.zec().send_unless_gone(ctx, &request).await? {
            return Ok(());
        }

        let zec = meta.zec();
        wait_recycled(
            ctx,
            format!("CIDR {cidr_id}"),
            &["DELETING", "RECYCLING"],
            zec.cidr_state_refresh(ctx, &cidr_id, CIDR_FAILED),
        )
        .await?;

        if d.get_bool("force_delete") && zec.send_unless_gone(ctx, &request).await? {
            wait_released(ctx, format!("CIDR {cidr_id}"), zec.cidr_state_refresh(ctx, &cidr_id, &[])).await?;
        }
        Ok(())
    }
}
