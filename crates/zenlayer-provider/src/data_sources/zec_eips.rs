//! `zenlayercloud_zec_eips`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::zec::EipFilter;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::{
    AttributeSchema, AttributeType, DataSource, OpContext, ResourceData, ResourceSchema, Result, Validator,
};
use zenlayer_sdk::zec::EipInfo;

pub struct EipsDataSource;

fn project(eip: &EipInfo) -> Value {
    json!({
        "id": eip.eip_id,
        "name": eip.name,
        "region_id": eip.region_id,
        "ip_network_type": eip.ip_network_type,
        "internet_charge_type": eip.internet_charge_type,
        "bandwidth": eip.bandwidth,
        "bandwidth_cluster_id": eip.bandwidth_cluster_id,
        "cidr_id": eip.cidr_id,
        "public_ip_address": eip.public_ip_addresses.first().cloned().unwrap_or_default(),
        "public_ip_addresses": eip.public_ip_addresses,
        "private_ip_address": eip.private_ip_address,
        "status": eip.status,
        "associated_id": eip.associated_id,
        "associated_type": eip.associated_type,
        "bind_type": eip.bind_type,
        "resource_group_id": eip.resource_group_id,
        "resource_group_name": eip.resource_group_name,
        "create_time": eip.create_time,
    })
}

#[async_trait]
impl DataSource<ZenlayerClient> for EipsDataSource {
    fn type_name(&self) -> &'static str {
        "zec_eips"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "eips", true)
            .with_description("Query elastic IPs")
            .attribute(AttributeSchema::new("region_id", AttributeType::String))
            .attribute(AttributeSchema::new("status", AttributeType::String))
            .attribute(AttributeSchema::new("ip_address", AttributeType::String).validate(Validator::Ip))
            .attribute(AttributeSchema::new("associated_id", AttributeType::String))
            .attribute(AttributeSchema::new("cidr_id", AttributeType::String))
            .attribute(AttributeSchema::new("resource_group_id", AttributeType::String))
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = EipFilter {
            ids: d.get_string_list("ids"),
            region_id: d.get_string("region_id"),
            status: d.get_string("status"),
            ip_address: d.get_string("ip_address"),
            associated_id: d.get_string("associated_id"),
            cidr_id: d.get_string("cidr_id"),
            resource_group_id: d.get_string("resource_group_id"),
            ..Default::default()
        };
        let eips = meta.zec().describe_eips_by_filter(ctx, &filter).await?;
        let entries = eips
            .iter()
            .filter(|eip| names.matches(&eip.name))
            .map(|eip| (eip.eip_id.clone(), project(eip)))
            .collect();
        publish(d, "eips", entries).await
    }
}
