//! `zenlayercloud_zec_vnics`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::zec::NicFilter;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::{AttributeSchema, AttributeType, DataSource, OpContext, ResourceData, ResourceSchema, Result};
use zenlayer_sdk::zec::NicInfo;

pub struct VnicsDataSource;

fn project(nic: &NicInfo) -> Value {
    json!({
        "id": nic.nic_id,
        "name": nic.name,
        "region_id": nic.region_id,
        "vpc_id": nic.vpc_id,
        "subnet_id": nic.subnet_id,
        "instance_id": nic.instance_id,
        "status": nic.status,
        "nic_type": nic.nic_type,
        "stack_type": nic.stack_type,
        "primary_ipv4": nic.primary_ipv4,
        "primary_ipv6": nic.primary_ipv6,
        "private_ip_addresses": nic.private_ip_addresses,
        "security_group_id": nic.security_group_id,
        "resource_group_id": nic.resource_group_id,
        "resource_group_name": nic.resource_group_name,
        "create_time": nic.create_time,
    })
}

#[async_trait]
impl DataSource<ZenlayerClient> for VnicsDataSource {
    fn type_name(&self) -> &'static str {
        "zec_vnics"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "vnics", true)
            .with_description("Query virtual NICs")
            .attribute(AttributeSchema::new("region_id", AttributeType::String))
            .attribute(AttributeSchema::new("vpc_id", AttributeType::String))
            .attribute(AttributeSchema::new("subnet_id", AttributeType::String))
            .attribute(AttributeSchema::new("instance_id", AttributeType::String))
            .attribute(AttributeSchema::new("status", AttributeType::String))
            .attribute(AttributeSchema::new("resource_group_id", AttributeType::String))
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = NicFilter {
            ids: d.get_string_list("ids"),
            region_id: d.get_string("region_id"),
            vpc_id: d.get_string("vpc_id"),
            subnet_id: d.get_string("subnet_id"),
            instance_id: d.get_string("instance_id"),
            status: d.get_string("status"),
            resource_group_id: d.get_string("resource_group_id"),
            ..Default::default()
        };
        let nics = meta.zec().describe_nics_by_filter(ctx, &filter).await?;
        let entries = nics
            .iter()
            .filter(|nic| names.matches(&nic.name))
            .map(|nic| (nic.nic_id.clone(), project(nic)))
            .collect();
        publish(d, "vnics", entries).await
    }
}
