//! `zenlayercloud_zec_border_gateway`

use super::{forget, kind};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, OpContext, Resource, ResourceData, ResourceSchema, Result, Validator,
};
use zenlayer_sdk::zec::{
    AssignBorderGatewayNatRequest, BorderGatewayInfo, CreateBorderGatewayRequest, DeleteBorderGatewayRequest,
    ModifyBorderGatewayAttributeRequest, UnassignBorderGatewayNatRequest,
};

/// Private 16-bit and 32-bit ASN range
const ASN_RANGE: (i64, i64) = (64512, 4_294_967_294);

pub struct BorderGatewayResource;

fn set_border_gateway(d: &mut ResourceData, zbg: &BorderGatewayInfo) {
    d.set("name", zbg.name.as_str());
    d.set("vpc_id", zbg.vpc_id.as_str());
    d.set("region_id", zbg.region_id.as_str());
    d.set("asn", zbg.asn);
    d.set("advertised_cidrs", zbg.advertised_cidrs.clone());
    d.set("nat_gateway_id", zbg.nat_id.as_str());
    d.set("inter_connect_cidr", zbg.inter_connect_cidr.as_str());
    d.set("create_time", zbg.create_time.as_str());
}

#[async_trait]
impl Resource<ZenlayerClient> for BorderGatewayResource {
    fn type_name(&self) -> &'static str {
        "zec_border_gateway"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Border gateway connecting a VPC to other networks")
            .attribute(AttributeSchema::new("vpc_id", AttributeType::String).required().force_new())
            .attribute(AttributeSchema::new("region_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .validate(Validator::NotEmpty),
            )
            .attribute(
                AttributeSchema::new("asn", AttributeType::Int)
                    .optional_computed()
                    .validate(Validator::IntBetween(ASN_RANGE.0, ASN_RANGE.1)),
            )
            .attribute(
                AttributeSchema::new("advertised_cidrs", AttributeType::Set)
                    .optional_computed()
                    .validate(Validator::Cidr),
            )
            .attribute(AttributeSchema::new("nat_gateway_id", AttributeType::String))
            .attribute(AttributeSchema::new("inter_connect_cidr", AttributeType::String).computed())
            .attribute(AttributeSchema::new("create_time", AttributeType::String).computed())
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = CreateBorderGatewayRequest {
            vpc_id: d.get_string("vpc_id"),
            region_id: d.get_string("region_id"),
            name: d.get_string("name"),
            asn: d.get_opt_i64("asn"),
            advertised_cidrs: d.is_set("advertised_cidrs").then(|| d.get_string_list("advertised_cidrs")),
        };
        let response = meta.zec().send(ctx, &request).await?;
        let zbg_id = response.zbg_id;
        d.set_id(&zbg_id);
        tracing::info!(zbg_id = %zbg_id, "border gateway created");

        if let Some(nat_id) = d.get_opt_str("nat_gateway_id") {
            let request = AssignBorderGatewayNatRequest {
                zbg_id: zbg_id.clone(),
                nat_id,
            };
            meta.zec().send(ctx, &request).await?;
        }

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let zbg_id = d.id().to_string();
        match meta.zec().describe_border_gateway_by_id(ctx, &zbg_id).await? {
            Some(zbg) => set_border_gateway(d, &zbg),
            None => forget(d, "border gateway"),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let zbg_id = d.id().to_string();

        if d.has_changes(&["name", "asn", "advertised_cidrs"]) {
            let request = ModifyBorderGatewayAttributeRequest {
                zbg_id: zbg_id.clone(),
                name: d.has_change("name").then(|| d.get_string("name")),
                asn: d.has_change("asn").then(|| d.get_opt_i64("asn")).flatten(),
                advertised_cidrs: d
                    .has_change("advertised_cidrs")
                    .then(|| d.get_string_list("advertised_cidrs")),
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(&["name", "asn", "advertised_cidrs"]);
        }

        if d.has_change("nat_gateway_id") {
            let (old, _) = d.get_change("nat_gateway_id");
            if old.as_str().is_some_and(|s| !s.is_empty()) {
                let request = UnassignBorderGatewayNatRequest { zbg_id: zbg_id.clone() };
                meta.zec().send(ctx, &request).await?;
            }
            if let Some(nat_id) = d.get_opt_str("nat_gateway_id") {
                let request = AssignBorderGatewayNatRequest {
                    zbg_id: zbg_id.clone(),
                    nat_id,
                };
                meta.zec().send(ctx, &request).await?;
            }
            d.commit(&["nat_gateway_id"]);
        }

        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = DeleteBorderGatewayRequest {
            zbg_id: d.id().to_string(),
        };
        meta.zec().send_unless_gone(ctx, &request).await?;
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
    fn test_asn_must_be_private() {
        let schema = BorderGatewayResource.schema();
        let config = attrs(json!({"vpc_id": "vpc-1", "region_id": "asia-east-1", "name": "zbg", "asn": 100}));
        assert!(schema.validate(&config).is_err());
        let config = attrs(json!({"vpc_id": "vpc-1", "region_id": "asia-east-1", "name": "zbg", "asn": 65001}));
        assert!(schema.validate(&config).is_ok());
    }
}
