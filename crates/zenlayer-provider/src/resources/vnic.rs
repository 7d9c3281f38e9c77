//! `zenlayercloud_zec_vnic`

use super::{forget, forget_in_state, kind, resource_group_id, resource_group_name, update_resource_group};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, CloudError, OpContext, Resource, ResourceData, ResourceSchema, Result,
    StateChangeConf, Validator, wait_settled,
};
use zenlayer_sdk::zec::{
    AssignSecurityGroupRequest, CreateNetworkInterfaceRequest, DeleteNetworkInterfaceRequest,
    ModifyNetworkInterfaceAttributeRequest, NicInfo,
};

pub(crate) const NIC_PENDING: &[&str] = &["PENDING", "ATTACHING", "DETACHING", "DELETING"];
pub(crate) const NIC_TARGET: &[&str] = &["AVAILABLE", "USED"];
pub(crate) const NIC_FAILED: &[&str] = &["CREATE_FAILED"];

pub struct VnicResource;

fn set_nic(d: &mut ResourceData, nic: &NicInfo) {
    d.set("name", nic.name.as_str());
    d.set("subnet_id", nic.subnet_id.as_str());
    d.set("vpc_id", nic.vpc_id.as_str());
    d.set("region_id", nic.region_id.as_str());
    d.set("primary_ipv4", nic.primary_ipv4.as_str());
    d.set("primary_ipv6", nic.primary_ipv6.as_str());
    d.set("stack_type", nic.stack_type.as_str());
    d.set("security_group_id", nic.security_group_id.as_str());
    d.set("instance_id", nic.instance_id.as_str());
    d.set("nic_type", nic.nic_type.as_str());
    d.set("status", nic.status.as_str());
    d.set("resource_group_id", nic.resource_group_id.as_str());
    d.set("resource_group_name", nic.resource_group_name.as_str());
    d.set("create_time", nic.create_time.as_str());
}

#[async_trait]
impl Resource<ZenlayerClient> for VnicResource {
    fn type_name(&self) -> &'static str {
        "zec_vnic"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Virtual network interface")
            .attribute(AttributeSchema::new("subnet_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .validate(Validator::NotEmpty),
            )
            .attribute(
                AttributeSchema::new("primary_ipv4", AttributeType::String)
                    .optional_computed()
                    .force_new()
                    .validate(Validator::Ip),
            )
            .attribute(
                AttributeSchema::new("stack_type", AttributeType::String)
                    .optional_computed()
                    .force_new()
                    .validate(Validator::StringInSlice(&["IPv4", "IPv6", "IPv4_IPv6"])),
            )
            .attribute(AttributeSchema::new("security_group_id", AttributeType::String).optional_computed())
            .attribute(resource_group_id())
            .attribute(resource_group_name())
            .attribute(AttributeSchema::new("status", AttributeType::String).computed())
            .attribute(AttributeSchema::new("primary_ipv6", AttributeType::String).computed())
            .attribute(AttributeSchema::new("instance_id", AttributeType::String).computed())
            .attribute(AttributeSchema::new("vpc_id", AttributeType::String).computed())
            .attribute(AttributeSchema::new("region_id", AttributeType::String).computed())
            .attribute(AttributeSchema::new("nic_type", AttributeType::String).computed())
            .attribute(AttributeSchema::new("create_time", AttributeType::String).computed())
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = CreateNetworkInterfaceRequest {
            name: d.get_string("name"),
            subnet_id: d.get_string("subnet_id"),
            primary_ipv4: d.get_opt_str("primary_ipv4"),
            stack_type: d.get_opt_str("stack_type"),
            security_group_id: d.get_opt_str("security_group_id"),
            resource_group_id: d.get_opt_str("resource_group_id"),
        };
        let response = meta.zec().send(ctx, &request).await?;
        if response.nic_id.is_empty() {
            return Err(CloudError::contract("CreateNetworkInterface returned no nicId"));
        }
        d.set_id(&response.nic_id);
        tracing::info!(nic_id = %response.nic_id, "creating vNIC");

        let zec = meta.zec();
        StateChangeConf::new(
            format!("vNIC {}", response.nic_id),
            &["PENDING"],
            NIC_TARGET,
            zec.nic_state_refresh(ctx, &response.nic_id, NIC_FAILED),
            ctx.loop_timeout(),
        )
        .wait(ctx)
        .await?;

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let nic_id = d.id().to_string();
        let refresh = meta.zec().nic_state_refresh(ctx, &nic_id, &[]);
        match wait_settled(ctx, &format!("vNIC {nic_id}"), NIC_PENDING, refresh).await? {
            None => forget(d, "vNIC"),
            Some(nic) if NIC_FAILED.contains(&nic.status.as_str()) => forget_in_state(d, "vNIC", &nic.status),
            Some(nic) => set_nic(d, &nic),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let nic_id = d.id().to_string();

        if d.has_change("name") {
            let request = ModifyNetworkInterfaceAttributeRequest {
                nic_id: nic_id.clone(),
                name: Some(d.get_string("name")),
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(&["name"]);
        }

        if d.has_change("security_group_id") {
            if let Some(security_group_id) = d.get_opt_str("security_group_id") {
                let request = AssignSecurityGroupRequest {
                    security_group_id,
                    nic_ids: vec![nic_id.clone()],
                };
                meta.zec().send(ctx, &request).await?;
            }
            d.commit(&["security_group_id"]);
        }

        update_resource_group(ctx, meta, d).await?;
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let nic_id = d.id().to_string();
        let request = DeleteNetworkInterfaceRequest { nic_id: nic_id.clone() };
        if !meta.zec().send_unless_gone(ctx, &request).await? {
            return Ok(());
        }

        let zec = meta.zec();
        StateChangeConf::new(
            format!("vNIC {nic_id}"),
            &["DELETING", "AVAILABLE"],
            &[],
            zec.nic_state_refresh(ctx, &nic_id, NIC_FAILED),
            ctx.loop_timeout(),
        )
        .wait(ctx)
        .await?;
        Ok(())
    }
}
