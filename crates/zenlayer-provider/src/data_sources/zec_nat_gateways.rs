//! `zenlayercloud_zec_nat_gateways`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::zec::NatGatewayFilter;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::{AttributeSchema, AttributeType, DataSource, OpContext, ResourceData, ResourceSchema, Result};
use zenlayer_sdk::zec::NatGatewayInfo;

pub struct NatGatewaysDataSource;

fn project(nat: &NatGatewayInfo) -> Value {
    json!({
        "id": nat.nat_gateway_id,
        "name": nat.name,
        "region_id": nat.region_id,
        "vpc_id": nat.vpc_id,
        "subnet_ids": nat.subnet_ids,
        "is_all_subnets": nat.is_all_subnets,
        "eip_ids": nat.eip_ids,
        "security_group_id": nat.security_group_id,
        "icmp_reply_enabled": nat.icmp_reply_enabled,
        "zbg_id": nat.zbg_id,
        "status": nat.status,
        "resource_group_id": nat.resource_group_id,
        "resource_group_name": nat.resource_group_name,
        "create_time": nat.create_time,
    })
}

#[async_trait]
impl DataSource<ZenlayerClient> for NatGatewaysDataSource {
    fn type_name(&self) -> &'static str {
        "zec_nat_gateways"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "nat_gateways", true)
            .with_description("Query NAT gateways")
            .attribute(AttributeSchema::new("region_id", AttributeType::String))
            .attribute(AttributeSchema::new("vpc_id", AttributeType::String))
            .attribute(AttributeSchema::new("resource_group_id", AttributeType::String))
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = NatGatewayFilter {
            ids: d.get_string_list("ids"),
            region_id: d.get_string("region_id"),
            vpc_id: d.get_string("vpc_id"),
            resource_group_id: d.get_string("resource_group_id"),
            ..Default::default()
        };
        let gateways = meta.zec().describe_nat_gateways_by_filter(ctx, &filter).await?;
        let entries = gateways
            .iter()
            .filter(|nat| names.matches(&nat.name))
            .map(|nat| (nat.nat_gateway_id.clone(), project(nat)))
            .collect();
        publish(d, "nat_gateways", entries).await
    }
}
