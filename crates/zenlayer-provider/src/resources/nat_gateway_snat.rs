//! `zenlayercloud_zec_nat_gateway_snat`: id `<nat>:<snat>`

use super::{forget, kind};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, CloudError, CompositeId, OpContext, Resource, ResourceData, ResourceSchema,
    Result, Rule, Validator, parse_pair,
};
use zenlayer_sdk::zec::{CreateSnatEntryRequest, DeleteSnatEntryRequest, ModifySnatEntryRequest, SnatEntry};

const MODIFIABLE: &[&str] = &["eip_ids", "is_all_eip", "subnet_ids", "source_cidr_blocks"];

pub struct NatGatewaySnatResource;

/// Request fields for the EIP and source selections, each exclusive
struct SnatSelection {
    eip_ids: Option<Vec<String>>,
    is_all_eip: Option<bool>,
    subnet_ids: Option<Vec<String>>,
    source_cidr_blocks: Option<Vec<String>>,
}

impl SnatSelection {
    fn from_data(d: &ResourceData) -> Self {
        let (eip_ids, is_all_eip) = if d.get_bool("is_all_eip") {
            (None, Some(true))
        } else {
            (Some(d.get_string_list("eip_ids")), None)
        };
        let (subnet_ids, source_cidr_blocks) = if d.is_set("source_cidr_blocks") {
            (None, Some(d.get_string_list("source_cidr_blocks")))
        } else {
            (Some(d.get_string_list("subnet_ids")), None)
        };
        Self {
            eip_ids,
            is_all_eip,
            subnet_ids,
            source_cidr_blocks,
        }
    }
}

fn set_snat(d: &mut ResourceData, snat: &SnatEntry) {
    d.set("nat_gateway_id", snat.nat_gateway_id.as_str());
    d.set("is_all_eip", snat.is_all_eip);
    if snat.is_all_eip {
        d.set("eip_ids", Vec::<String>::new());
    } else {
        d.set("eip_ids", snat.eip_ids.clone());
    }
    d.set("subnet_ids", snat.subnet_ids.clone());
    d.set("source_cidr_blocks", snat.source_cidr_blocks.clone());
    d.set("snat_entry_id", snat.snat_entry_id.as_str());
}

#[async_trait]
impl Resource<ZenlayerClient> for NatGatewaySnatResource {
    fn type_name(&self) -> &'static str {
        "zec_nat_gateway_snat"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Source NAT entry of a NAT gateway")
            .attribute(AttributeSchema::new("nat_gateway_id", AttributeType::String).required().force_new())
            .attribute(AttributeSchema::new("eip_ids", AttributeType::Set))
            .attribute(AttributeSchema::new("is_all_eip", AttributeType::Bool))
            .attribute(AttributeSchema::new("subnet_ids", AttributeType::Set))
            .attribute(AttributeSchema::new("source_cidr_blocks", AttributeType::Set).validate(Validator::Cidr))
            .attribute(AttributeSchema::new("snat_entry_id", AttributeType::String).computed())
            .rule(Rule::ExactlyOneOf(&["eip_ids", "is_all_eip"]))
            .rule(Rule::ExactlyOneOf(&["subnet_ids", "source_cidr_blocks"]))
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let nat_gateway_id = d.get_string("nat_gateway_id");
        let selection = SnatSelection::from_data(d);
        let request = CreateSnatEntryRequest {
            nat_gateway_id: nat_gateway_id.clone(),
            eip_ids: selection.eip_ids,
            is_all_eip: selection.is_all_eip,
            subnet_ids: selection.subnet_ids,
            source_cidr_blocks: selection.source_cidr_blocks,
        };
        let response = meta.zec().send(ctx, &request).await?;
        if response.snat_entry_id.is_empty() {
            return Err(CloudError::contract("CreateSnatEntry returned no snatEntryId"));
        }
        d.set_id(CompositeId::new([nat_gateway_id.as_str(), response.snat_entry_id.as_str()]).encode());
        tracing::info!(nat_gateway_id = %nat_gateway_id, snat_entry_id = %response.snat_entry_id, "SNAT entry created");

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (nat_gateway_id, snat_entry_id) = parse_pair(d.id())?;
        match meta.zec().describe_snat_entry(ctx, &nat_gateway_id, &snat_entry_id).await? {
            Some(snat) => set_snat(d, &snat),
            None => forget(d, "SNAT entry"),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        if d.has_changes(MODIFIABLE) {
            let (_, snat_entry_id) = parse_pair(d.id())?;
            let selection = SnatSelection::from_data(d);
            let request = ModifySnatEntryRequest {
                snat_entry_id,
                eip_ids: selection.eip_ids,
                is_all_eip: selection.is_all_eip,
                subnet_ids: selection.subnet_ids,
                source_cidr_blocks: selection.source_cidr_blocks,
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(MODIFIABLE);
        }
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (_, snat_entry_id) = parse_pair(d.id())?;
        meta.zec()
            .send_unless_gone(ctx, &DeleteSnatEntryRequest { snat_entry_id })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn attrs(value: Value) -> zenlayer_cloud::Attributes {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_selections_are_exclusive() {
        let schema = NatGatewaySnatResource.schema();
        let config = attrs(json!({
            "nat_gateway_id": "nat-1", "is_all_eip": true, "eip_ids": ["eip-1"], "subnet_ids": ["subnet-1"]
        }));
        assert!(schema.validate(&config).is_err());

        let config = attrs(json!({
            "nat_gateway_id": "nat-1", "is_all_eip": true,
            "subnet_ids": ["subnet-1"], "source_cidr_blocks": ["10.0.0.0/24"]
        }));
        assert!(schema.validate(&config).is_err());

        let config = attrs(json!({
            "nat_gateway_id": "nat-1", "eip_ids": ["eip-1"], "source_cidr_blocks": ["10.0.0.0/24"]
        }));
        assert!(schema.validate(&config).is_ok());
    }

    #[test]
    fn test_selection_request_fields() {
        let d = ResourceData::new(attrs(json!({
            "nat_gateway_id": "nat-1", "is_all_eip": true, "source_cidr_blocks": ["10.0.0.0/24"]
        })));
        let selection = SnatSelection::from_data(&d);
        assert_eq!(selection.is_all_eip, Some(true));
        assert!(selection.eip_ids.is_none());
        assert!(selection.subnet_ids.is_none());
        assert_eq!(selection.source_cidr_blocks, Some(vec!["10.0.0.0/24".to_string()]));
    }
}
