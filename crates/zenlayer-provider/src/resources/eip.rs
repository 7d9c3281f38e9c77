//! `zenlayercloud_zec_eip`

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
use zenlayer_sdk::zec::{CreateEipsRequest, DeleteEipRequest, EipInfo, ModifyEipAttributeRequest, ModifyEipBandwidthRequest};

const EIP_PENDING: &[&str] = &["CREATING", "DELETING", "RECYCLING"];
const EIP_TARGET: &[&str] = &["BINDED", "UNBIND"];
pub(crate) const EIP_FAILED: &[&str] = &["CREATE_FAILED"];
const EIP_GONE: &[&str] = &["CREATE_FAILED", "RECYCLED"];

const CHARGE_TYPES: &[&str] = &["ByBandwidth", "ByTrafficPackage", "BandwidthCluster", "ByTraffic"];

pub struct EipResource;

fn set_eip(d: &mut ResourceData, eip: &EipInfo) {
    d.set("name", eip.name.as_str());
    d.set("region_id", eip.region_id.as_str());
    d.set("ip_network_type", eip.ip_network_type.as_str());
    d.set("internet_charge_type", eip.internet_charge_type.as_str());
    d.set("bandwidth", eip.bandwidth);
    d.set("bandwidth_cluster_id", eip.bandwidth_cluster_id.as_str());
    d.set("cidr_id", eip.cidr_id.as_str());
    d.set(
        "public_ip_address",
        eip.public_ip_addresses.first().map(String::as_str).unwrap_or_default(),
    );
    d.set("private_ip_address", eip.private_ip_address.as_str());
    d.set("status", eip.status.as_str());
    d.set("associated_id", eip.associated_id.as_str());
    d.set("associated_type", eip.associated_type.as_str());
    d.set("bind_type", eip.bind_type.as_str());
    d.set("resource_group_id", eip.resource_group_id.as_str());
    d.set("resource_group_name", eip.resource_group_name.as_str());
    d.set("create_time", eip.create_time.as_str());
}

#[async_trait]
impl Resource<ZenlayerClient> for EipResource {
    fn type_name(&self) -> &'static str {
        "zec_eip"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Elastic IP")
            .attribute(AttributeSchema::new("region_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .validate(Validator::NotEmpty),
            )
            .attribute(AttributeSchema::new("ip_network_type", AttributeType::String).optional_computed().force_new())
            .attribute(
                AttributeSchema::new("internet_charge_type", AttributeType::String)
                    .required()
                    .force_new()
                    .validate(Validator::StringInSlice(CHARGE_TYPES)),
            )
            .attribute(
                AttributeSchema::new("bandwidth", AttributeType::Int)
                    .optional_computed()
                    .validate(Validator::IntAtLeast(1))
                    .with_description("Bandwidth cap in Mbps"),
            )
            .attribute(AttributeSchema::new("bandwidth_cluster_id", AttributeType::String).optional_computed())
            .attribute(AttributeSchema::new("cidr_id", AttributeType::String).optional_computed().force_new())
            .attribute(resource_group_id())
            .attribute(resource_group_name())
            .attribute(force_delete())
            .attribute(AttributeSchema::new("public_ip_address", AttributeType::String).computed())
            .attribute(AttributeSchema::new("private_ip_address", AttributeType::String).computed())
            .attribute(AttributeSchema::new("status", AttributeType::String).computed())
            .attribute(AttributeSchema::new("associated_id", AttributeType::String).computed())
            .attribute(AttributeSchema::new("associated_type", AttributeType::String).computed())
            .attribute(AttributeSchema::new("bind_type", AttributeType::String).computed())
            .attribute(AttributeSchema::new("create_time", AttributeType::String).computed())
            .rule(Rule::RequiredWhen {
                attr: "bandwidth_cluster_id",
                when: "internet_charge_type",
                equals: "BandwidthCluster",
            })
            .rule(Rule::ConflictsWith("ip_network_type", "cidr_id"))
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = CreateEipsRequest {
            region_id: d.get_string("region_id"),
            name: d.get_string("name"),
            ip_network_type: d.get_opt_str("ip_network_type"),
            internet_charge_type: d.get_string("internet_charge_type"),
            bandwidth: d.get_opt_i64("bandwidth"),
            cluster_id: d.get_opt_str("bandwidth_cluster_id"),
            cidr_id: d.get_opt_str("cidr_id"),
            amount: 1,
            resource_group_id: d.get_opt_str("resource_group_id"),
        };
        let response = meta.zec().send(ctx, &request).await?;
        let Some(eip_id) = response.eip_ids.into_iter().next() else {
            return Err(CloudError::contract("CreateEips returned no eipIds"));
        };
        d.set_id(&eip_id);
        tracing::info!(eip_id = %eip_id, "creating EIP");

        let zec = meta.zec();
        StateChangeConf::new(
            format!("EIP {eip_id}"),
            &["CREATING"],
            EIP_TARGET,
            zec.eip_state_refresh(ctx, &eip_id, EIP_FAILED),
            ctx.loop_timeout(),
        )
        .wait(ctx)
        .await?;

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let eip_id = d.id().to_string();
        let refresh = meta.zec().eip_state_refresh(ctx, &eip_id, &[]);
        match wait_settled(ctx, &format!("EIP {eip_id}"), EIP_PENDING, refresh).await? {
            None => forget(d, "EIP"),
            Some(eip) if EIP_GONE.contains(&eip.status.as_str()) => forget_in_state(d, "EIP", &eip.status),
            Some(eip) => set_eip(d, &eip),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let eip_id = d.id().to_string();

        if d.has_change("name") {
            let request = ModifyEipAttributeRequest {
                eip_id: eip_id.clone(),
                name: d.get_string("name"),
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(&["name"]);
        }

        if d.has_changes(&["bandwidth", "bandwidth_cluster_id"]) {
            let request = ModifyEipBandwidthRequest {
                eip_ids: vec![eip_id.clone()],
                bandwidth: d.has_change("bandwidth").then(|| d.get_i64("bandwidth")),
                bandwidth_cluster_id: if d.has_change("bandwidth_cluster_id") {
                    d.get_opt_str("bandwidth_cluster_id")
                } else {
                    None
                },
            };
            tracing::info!(eip_id = %eip_id, "changing EIP bandwidth");
            meta.zec().send(ctx, &request).await?;
            d.commit(&["bandwidth", "bandwidth_cluster_id"]);
        }

        update_resource_group(ctx, meta, d).await?;
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let eip_id = d.id().to_string();
        let request = DeleteEipRequest { eip_id: eip_id.clone() };
        if !meta.zec().send_unless_gone(ctx, &request).await? {
            return Ok(());
        }

        let zec = meta.zec();
        wait_recycled(
            ctx,
            format!("EIP {eip_id}"),
            &["DELETING", "RECYCLING"],
            zec.eip_state_refresh(ctx, &eip_id, EIP_FAILED),
        )
        .await?;

        if d.get_bool("force_delete") {
            tracing::info!(eip_id = %eip_id, "releasing EIP from the recycle bin");
            if zec.send_unless_gone(ctx, &request).await? {
                wait_released(ctx, format!("EIP {eip_id}"), zec.eip_state_refresh(ctx, &eip_id, &[])).await?;
            }
        }
        Ok(())
    }
}
