//! `zenlayercloud_zec_vpc_routes`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::zec::RouteFilter;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::{
    AttributeSchema, AttributeType, DataSource, OpContext, ResourceData, ResourceSchema, Result, Validator,
};
use zenlayer_sdk::zec::RouteInfo;

pub struct VpcRoutesDataSource;

fn project(route: &RouteInfo) -> Value {
    json!({
        "id": route.route_id,
        "name": route.name,
        "vpc_id": route.vpc_id,
        "ip_version": route.ip_version,
        "route_type": route.route_type,
        "destination_cidr_block": route.destination_cidr_block,
        "source_ip": route.source_ip,
        "next_hop_id": route.next_hop_id,
        "next_hop_name": route.next_hop_name,
        "next_hop_type": route.next_hop_type,
        "priority": route.priority,
        "create_time": route.create_time,
    })
}

#[async_trait]
impl DataSource<ZenlayerClient> for VpcRoutesDataSource {
    fn type_name(&self) -> &'static str {
        "zec_vpc_routes"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "routes", true)
            .with_description("Query VPC routes")
            .attribute(AttributeSchema::new("vpc_id", AttributeType::String))
            .attribute(
                AttributeSchema::new("ip_version", AttributeType::String)
                    .validate(Validator::StringInSlice(&["IPv4", "IPv6"])),
            )
            .attribute(
                AttributeSchema::new("route_type", AttributeType::String)
                    .validate(Validator::StringInSlice(&["RouteTypeStatic", "RouteTypePolicy"])),
            )
            .attribute(AttributeSchema::new("destination_cidr_block", AttributeType::String))
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = RouteFilter {
            ids: d.get_string_list("ids"),
            vpc_id: d.get_string("vpc_id"),
            ip_version: d.get_string("ip_version"),
            route_type: d.get_string("route_type"),
            destination_cidr_block: d.get_string("destination_cidr_block"),
        };
        let routes = meta.zec().describe_vpc_routes_by_filter(ctx, &filter).await?;
        let entries = routes
            .iter()
            .filter(|route| names.matches(&route.name))
            .map(|route| (route.route_id.clone(), project(route)))
            .collect();
        publish(d, "routes", entries).await
    }
}
