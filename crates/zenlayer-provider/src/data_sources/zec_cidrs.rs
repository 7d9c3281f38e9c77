//! `zenlayercloud_zec_cidrs`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::zec::CidrFilter;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::{AttributeSchema, AttributeType, DataSource, OpContext, ResourceData, ResourceSchema, Result};
use zenlayer_sdk::zec::CidrInfo;

pub struct CidrsDataSource;

fn project(cidr: &CidrInfo) -> Value {
    json!({
        "id": cidr.cidr_id,
        "name": cidr.name,
        "region_id": cidr.region_id,
        "cidr_block": cidr.cidr_block,
        "netmask": cidr.netmask,
        "network_type": cidr.network_type,
        "status": cidr.status,
        "used_count": cidr.used_count,
        "resource_group_id": cidr.resource_group_id,
        "resource_group_name": cidr.resource_group_name,
        "create_time": cidr.create_time,
        "expired_time": cidr.expired_time,
    })
}

#[async_trait]
impl DataSource<ZenlayerClient> for CidrsDataSource {
    fn type_name(&self) -> &'static str {
        "zec_cidrs"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "cidrs", true)
            .with_description("Query public CIDR blocks")
            .attribute(AttributeSchema::new("region_id", AttributeType::String))
            .attribute(AttributeSchema::new("cidr_block", AttributeType::String))
            .attribute(AttributeSchema::new("status", AttributeType::String))
            .attribute(AttributeSchema::new("resource_group_id", AttributeType::String))
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = CidrFilter {
            ids: d.get_string_list("ids"),
            region_id: d.get_string("region_id"),
            cidr_block: d.get_string("cidr_block"),
            status: d.get_string("status"),
            resource_group_id: d.get_string("resource_group_id"),
            ..Default::default()
        };
        let cidrs = meta.zec().describe_cidrs_by_filter(ctx, &filter).await?;
        let entries = cidrs
            .iter()
            .filter(|cidr| names.matches(&cidr.name))
            .map(|cidr| (cidr.cidr_id.clone(), project(cidr)))
            .collect();
        publish(d, "cidrs", entries).await
    }
}
