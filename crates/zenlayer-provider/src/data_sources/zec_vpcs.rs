//! `zenlayercloud_zec_vpcs`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::zec::VpcFilter;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::{AttributeSchema, AttributeType, DataSource, OpContext, ResourceData, ResourceSchema, Result};
use zenlayer_sdk::zec::VpcInfo;

pub struct VpcsDataSource;

fn project(vpc: &VpcInfo) -> Value {
    json!({
        "id": vpc.vpc_id,
        "name": vpc.name,
        "cidr_block": vpc.cidr_block,
        "ipv6_cidr_block": vpc.ipv6_cidr_block,
        "mtu": vpc.mtu,
        "is_default": vpc.is_default,
        "security_group_id": vpc.security_group_id,
        "subnet_ids": vpc.subnet_ids,
        "resource_group_id": vpc.resource_group_id,
        "resource_group_name": vpc.resource_group_name,
        "create_time": vpc.create_time,
    })
}

#[async_trait]
impl DataSource<ZenlayerClient> for VpcsDataSource {
    fn type_name(&self) -> &'static str {
        "zec_vpcs"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "vpcs", true)
            .with_description("Query VPCs")
            .attribute(AttributeSchema::new("cidr_block", AttributeType::String))
            .attribute(AttributeSchema::new("resource_group_id", AttributeType::String))
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = VpcFilter {
            ids: d.get_string_list("ids"),
            cidr_block: d.get_string("cidr_block"),
            resource_group_id: d.get_string("resource_group_id"),
            ..Default::default()
        };
        let vpcs = meta.zec().describe_vpcs_by_filter(ctx, &filter).await?;
        let entries = vpcs
            .iter()
            .filter(|vpc| names.matches(&vpc.name))
            .map(|vpc| (vpc.vpc_id.clone(), project(vpc)))
            .collect();
        publish(d, "vpcs", entries).await
    }
}
