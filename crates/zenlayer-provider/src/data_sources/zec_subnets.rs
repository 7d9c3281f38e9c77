//! `zenlayercloud_zec_subnets`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::zec::SubnetFilter;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::{AttributeSchema, AttributeType, DataSource, OpContext, ResourceData, ResourceSchema, Result};
use zenlayer_sdk::zec::SubnetInfo;

pub struct SubnetsDataSource;

fn project(subnet: &SubnetInfo) -> Value {
    json!({
        "id": subnet.subnet_id,
        "name": subnet.name,
        "region_id": subnet.region_id,
        "vpc_id": subnet.vpc_id,
        "cidr_block": subnet.cidr_block,
        "ipv6_cidr_block": subnet.ipv6_cidr_block,
        "ipv6_type": subnet.ipv6_type,
        "stack_type": subnet.stack_type,
        "is_default": subnet.is_default,
        "usage_ip_count": subnet.usage_ip_count,
        "create_time": subnet.create_time,
    })
}

#[async_trait]
impl DataSource<ZenlayerClient> for SubnetsDataSource {
    fn type_name(&self) -> &'static str {
        "zec_subnets"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "subnets", true)
            .with_description("Query subnets")
            .attribute(AttributeSchema::new("region_id", AttributeType::String))
            .attribute(AttributeSchema::new("vpc_id", AttributeType::String))
            .attribute(AttributeSchema::new("cidr_block", AttributeType::String))
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = SubnetFilter {
            ids: d.get_string_list("ids"),
            region_id: d.get_string("region_id"),
            vpc_id: d.get_string("vpc_id"),
            cidr_block: d.get_string("cidr_block"),
            ..Default::default()
        };
        let subnets = meta.zec().describe_subnets_by_filter(ctx, &filter).await?;
        let entries = subnets
            .iter()
            .filter(|subnet| names.matches(&subnet.name))
            .map(|subnet| (subnet.subnet_id.clone(), project(subnet)))
            .collect();
        publish(d, "subnets", entries).await
    }
}
