//! `zenlayercloud_zec_vpc_route`

use super::{forget, kind};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, OpContext, Resource, ResourceData, ResourceSchema, Result, Rule, Validator,
};
use zenlayer_sdk::zec::{CreateVpcRouteRequest, DeleteVpcRouteRequest, ModifyVpcRouteAttributeRequest, RouteInfo};

const ROUTE_TYPE_POLICY: &str = "RouteTypePolicy";
const MODIFIABLE: &[&str] = &["name", "priority", "next_hop_id"];

pub struct VpcRouteResource;

fn set_route(d: &mut ResourceData, route: &RouteInfo) {
    d.set("vpc_id", route.vpc_id.as_str());
    d.set("ip_version", route.ip_version.as_str());
    d.set("route_type", route.route_type.as_str());
    d.set("destination_cidr_block", route.destination_cidr_block.as_str());
    d.set("source_ip", route.source_ip.as_str());
    d.set("next_hop_id", route.next_hop_id.as_str());
    d.set("next_hop_name", route.next_hop_name.as_str());
    d.set("next_hop_type", route.next_hop_type.as_str());
    d.set("name", route.name.as_str());
    d.set("priority", route.priority);
    d.set("create_time", route.create_time.as_str());
}

#[async_trait]
impl Resource<ZenlayerClient> for VpcRouteResource {
    fn type_name(&self) -> &'static str {
        "zec_vpc_route"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Static or policy route of a VPC")
            .attribute(AttributeSchema::new("vpc_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("ip_version", AttributeType::String)
                    .required()
                    .force_new()
                    .validate(Validator::StringInSlice(&["IPv4", "IPv6"])),
            )
            .attribute(
                AttributeSchema::new("route_type", AttributeType::String)
                    .required()
                    .force_new()
                    .validate(Validator::StringInSlice(&["RouteTypeStatic", ROUTE_TYPE_POLICY])),
            )
            .attribute(
                AttributeSchema::new("destination_cidr_block", AttributeType::String)
                    .required()
                    .force_new()
                    .validate(Validator::Cidr),
            )
            .attribute(
                AttributeSchema::new("source_ip", AttributeType::String)
                    .force_new()
                    .with_description("Source address or CIDR; policy routes only"),
            )
            .attribute(AttributeSchema::new("next_hop_id", AttributeType::String).required())
            .attribute(AttributeSchema::new("name", AttributeType::String).optional_computed())
            .attribute(
                AttributeSchema::new("priority", AttributeType::Int)
                    .optional_computed()
                    .validate(Validator::IntBetween(0, 65535)),
            )
            .attribute(AttributeSchema::new("next_hop_type", AttributeType::String).computed())
            .attribute(AttributeSchema::new("next_hop_name", AttributeType::String).computed())
            .attribute(AttributeSchema::new("create_time", AttributeType::String).computed())
            .rule(Rule::RequiredWhen {
                attr: "source_ip",
                when: "route_type",
                equals: ROUTE_TYPE_POLICY,
            })
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = CreateVpcRouteRequest {
            vpc_id: d.get_string("vpc_id"),
            ip_version: d.get_string("ip_version"),
            route_type: d.get_string("route_type"),
            destination_cidr_block: d.get_string("destination_cidr_block"),
            source_ip: d.get_opt_str("source_ip"),
            next_hop_id: d.get_string("next_hop_id"),
            name: d.get_opt_str("name"),
            priority: d.get_opt_i64("priority"),
        };
        let response = meta.zec().send(ctx, &request).await?;
        d.set_id(&response.route_id);
        tracing::info!(route_id = %response.route_id, "VPC route created");
        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let route_id = d.id().to_string();
        match meta.zec().describe_vpc_route_by_id(ctx, &route_id).await? {
            Some(route) => set_route(d, &route),
            None => forget(d, "VPC route"),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        if d.has_changes(MODIFIABLE) {
            let request = ModifyVpcRouteAttributeRequest {
                route_id: d.id().to_string(),
                name: d.has_change("name").then(|| d.get_string("name")),
                priority: d.has_change("priority").then(|| d.get_opt_i64("priority")).flatten(),
                next_hop_id: d.has_change("next_hop_id").then(|| d.get_string("next_hop_id")),
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(MODIFIABLE);
        }
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = DeleteVpcRouteRequest {
            route_id: d.id().to_string(),
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
    fn test_policy_route_requires_source_ip() {
        let schema = VpcRouteResource.schema();
        let mut config = attrs(json!({
            "vpc_id": "vpc-1", "ip_version": "IPv4", "route_type": "RouteTypePolicy",
            "destination_cidr_block": "0.0.0.0/0", "next_hop_id": "nat-1"
        }));
        assert!(schema.validate(&config).is_err());

        config.insert("source_ip".to_string(), json!("10.0.1.0/24"));
        assert!(schema.validate(&config).is_ok());
    }

    #[test]
    fn test_static_route_needs_no_source_ip() {
        let config = attrs(json!({
            "vpc_id": "vpc-1", "ip_version": "IPv4", "route_type": "RouteTypeStatic",
            "destination_cidr_block": "192.168.0.0/16", "next_hop_id": "zbg-1"
        }));
        assert!(VpcRouteResource.schema().validate(&config).is_ok());
    }
}
