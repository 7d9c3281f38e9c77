//! `zenlayercloud_zec_eip_association`: id `<eip>:<target>:<type>`

use super::eip::EIP_FAILED;
use super::{forget, kind};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, CompositeId, OpContext, Resource, ResourceData, ResourceSchema, Result, Rule,
    StateChangeConf, Validator, parse_triple,
};
use zenlayer_sdk::zec::{AssociateEipAddressRequest, UnassociateEipAddressRequest};

pub struct EipAssociationResource;

#[async_trait]
impl Resource<ZenlayerClient> for EipAssociationResource {
    fn type_name(&self) -> &'static str {
        "zec_eip_association"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Binding of an EIP to a vNIC, NAT gateway or load balancer")
            .attribute(AttributeSchema::new("eip_id", AttributeType::String).required().force_new())
            .attribute(AttributeSchema::new("associated_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("associated_type", AttributeType::String)
                    .required()
                    .force_new()
                    .validate(Validator::StringInSlice(&["NIC", "NAT", "LB"])),
            )
            .attribute(
                AttributeSchema::new("private_ip_address", AttributeType::String)
                    .optional_computed()
                    .force_new()
                    .validate(Validator::Ip),
            )
            .attribute(
                AttributeSchema::new("bind_type", AttributeType::String)
                    .optional_computed()
                    .force_new()
                    .validate(Validator::StringInSlice(&["FullNat", "Passthrough"])),
            )
            .rule(Rule::OnlyWhen {
                attr: "bind_type",
                when: "associated_type",
                equals: "NIC",
            })
            .rule(Rule::OnlyWhen {
                attr: "private_ip_address",
                when: "associated_type",
                equals: "NIC",
            })
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let eip_id = d.get_string("eip_id");
        let associated_id = d.get_string("associated_id");
        let associated_type = d.get_string("associated_type");
        let request = AssociateEipAddressRequest {
            eip_ids: vec![eip_id.clone()],
            associated_id: associated_id.clone(),
            associated_type: associated_type.clone(),
            private_ip_address: d.get_opt_str("private_ip_address"),
            bind_type: d.get_opt_str("bind_type"),
        };
        meta.zec().send(ctx, &request).await?;
        d.set_id(CompositeId::new([eip_id.as_str(), associated_id.as_str(), associated_type.as_str()]).encode());
        tracing::info!(eip_id = %eip_id, associated_id = %associated_id, "associating EIP");

        let zec = meta.zec();
        StateChangeConf::new(
            format!("EIP {eip_id}"),
            &["UNBIND", "BINDING"],
            &["BINDED"],
            zec.eip_state_refresh(ctx, &eip_id, EIP_FAILED),
            ctx.loop_timeout(),
        )
        .wait(ctx)
        .await?;

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (eip_id, associated_id, associated_type) = parse_triple(d.id())?;
        let eip = match meta.zec().describe_eip_by_id(ctx, &eip_id).await? {
            Some(eip) if eip.associated_id == associated_id => eip,
            _ => {
                forget(d, "EIP association");
                return Ok(());
            }
        };
        d.set("eip_id", eip_id);
        d.set("associated_id", associated_id);
        d.set(
            "associated_type",
            if eip.associated_type.is_empty() {
                associated_type
            } else {
                eip.associated_type.clone()
            },
        );
        if eip.associated_type == "NIC" {
            d.set("private_ip_address", eip.private_ip_address.as_str());
            d.set("bind_type", eip.bind_type.as_str());
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (eip_id, _, _) = parse_triple(d.id())?;
        let request = UnassociateEipAddressRequest {
            eip_ids: vec![eip_id.clone()],
        };
        if !meta.zec().send_unless_gone(ctx, &request).await? {
            return Ok(());
        }

        let zec = meta.zec();
        StateChangeConf::new(
            format!("EIP {eip_id}"),
            &["BINDED", "UNBINDING"],
            &["UNBIND"],
            zec.eip_state_refresh(ctx, &eip_id, EIP_FAILED),
            ctx.loop_timeout(),
        )
        .accept_gone()
        .wait(ctx)
        .await?;
        Ok(())
    }
}
