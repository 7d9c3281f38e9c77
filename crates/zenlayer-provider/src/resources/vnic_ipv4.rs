//! `zenlayercloud_zec_vnic_ipv4`: secondary private IPv4 addresses of a vNIC

use super::{forget, kind};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use std::collections::BTreeSet;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, OpContext, Resource, ResourceData, ResourceSchema, Result, Rule, Validator,
};
use zenlayer_sdk::zec::{AssignNetworkInterfaceIpv4Request, UnassignNetworkInterfaceIpv4Request};

pub struct VnicIpv4Resource;

async fn assign(
    ctx: &OpContext,
    meta: &ZenlayerClient,
    nic_id: &str,
    ip_addresses: Option<Vec<String>>,
    count: Option<i64>,
) -> Result<()> {
    let request = AssignNetworkInterfaceIpv4Request {
        nic_id: nic_id.to_string(),
        ip_addresses,
        secondary_private_ip_count: count,
    };
    meta.zec().send(ctx, &request).await?;
    Ok(())
}

async fn unassign(ctx: &OpContext, meta: &ZenlayerClient, nic_id: &str, ip_addresses: Vec<String>) -> Result<()> {
    if ip_addresses.is_empty() {
        return Ok(());
    }
    let request = UnassignNetworkInterfaceIpv4Request {
        nic_id: nic_id.to_string(),
        ip_addresses,
    };
    meta.zec().send_unless_gone(ctx, &request).await?;
    Ok(())
}

#[async_trait]
impl Resource<ZenlayerClient> for VnicIpv4Resource {
    fn type_name(&self) -> &'static str {
        "zec_vnic_ipv4"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Secondary private IPv4 addresses of a vNIC")
            .attribute(AttributeSchema::new("vnic_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("secondary_private_ip_addresses", AttributeType::Set)
                    .optional_computed()
                    .validate(Validator::Ip),
            )
            .attribute(
                AttributeSchema::new("secondary_private_ip_count", AttributeType::Int)
                    .optional_computed()
                    .validate(Validator::IntAtLeast(1)),
            )
            .rule(Rule::ExactlyOneOf(&[
                "secondary_private_ip_addresses",
                "secondary_private_ip_count",
            ]))
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let nic_id = d.get_string("vnic_id");
        let addresses = d.get_string_list("secondary_private_ip_addresses");
        if addresses.is_empty() {
            assign(ctx, meta, &nic_id, None, d.get_opt_i64("secondary_private_ip_count")).await?;
        } else {
            assign(ctx, meta, &nic_id, Some(addresses), None).await?;
        }
        d.set_id(&nic_id);
        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let Some(nic) = meta.zec().describe_nic_by_id(ctx, d.id()).await? else {
            forget(d, "vNIC");
            return Ok(());
        };
        let secondary = nic.secondary_ipv4();
        d.set("vnic_id", nic.nic_id.as_str());
        d.set("secondary_private_ip_count", secondary.len() as i64);
        d.set("secondary_private_ip_addresses", secondary);
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let nic_id = d.id().to_string();

        if d.has_change("secondary_private_ip_addresses") {
            let (old, new) = d.get_change("secondary_private_ip_addresses");
            let old: BTreeSet<String> = serde_json::from_value(old).unwrap_or_default();
            let new: BTreeSet<String> = serde_json::from_value(new).unwrap_or_default();

            let removed: Vec<String> = old.difference(&new).cloned().collect();
            let added: Vec<String> = new.difference(&old).cloned().collect();
            unassign(ctx, meta, &nic_id, removed).await?;
            if !added.is_empty() {
                assign(ctx, meta, &nic_id, Some(added), None).await?;
            }
            d.commit(&["secondary_private_ip_addresses", "secondary_private_ip_count"]);
        } else if d.has_change("secondary_private_ip_count") {
            let current = d.get_string_list("secondary_private_ip_addresses");
            let wanted = d.get_i64("secondary_private_ip_count");
            let have = current.len() as i64;
            if wanted > have {
                assign(ctx, meta, &nic_id, None, Some(wanted - have)).await?;
            } else {
                let surplus = current.into_iter().skip(wanted as usize).collect();
                unassign(ctx, meta, &nic_id, surplus).await?;
            }
            d.commit(&["secondary_private_ip_count"]);
        }

        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let Some(nic) = meta.zec().describe_nic_by_id(ctx, d.id()).await? else {
            return Ok(());
        };
        unassign(ctx, meta, &nic.nic_id, nic.secondary_ipv4()).await
    }
}
