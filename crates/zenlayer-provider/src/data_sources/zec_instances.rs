//! `zenlayercloud_zec_instances`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::zec::InstanceFilter;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::{
    AttributeSchema, AttributeType, DataSource, OpContext, ResourceData, ResourceSchema, Result, Validator,
};
use zenlayer_sdk::zec::InstanceInfo;

pub struct InstancesDataSource;

fn project(instance: &InstanceInfo) -> Value {
    json!({
        "id": instance.instance_id,
        "instance_name": instance.instance_name,
        "zone_id": instance.zone_id,
        "instance_type": instance.instance_type,
        "cpu": instance.cpu,
        "memory": instance.memory,
        "image_id": instance.image_id,
        "image_name": instance.image_name,
        "instance_status": instance.status,
        "key_id": instance.key_id,
        "system_disk_id": instance.system_disk.disk_id,
        "system_disk_size": instance.system_disk.disk_size,
        "system_disk_category": instance.system_disk.disk_category,
        "data_disk_ids": instance.data_disks.iter().map(|disk| disk.disk_id.as_str()).collect::<Vec<_>>(),
        "subnet_id": instance.subnet_id,
        "vpc_id": instance.vpc_id,
        "nic_id": instance.nic_id,
        "security_group_id": instance.security_group_id,
        "private_ip_addresses": instance.private_ip_addresses,
        "public_ip_addresses": instance.public_ip_addresses,
        "resource_group_id": instance.resource_group_id,
        "resource_group_name": instance.resource_group_name,
        "create_time": instance.create_time,
    })
}

#[async_trait]
impl DataSource<ZenlayerClient> for InstancesDataSource {
    fn type_name(&self) -> &'static str {
        "zec_instances"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "instances", true)
            .with_description("Query ZEC instances")
            .attribute(AttributeSchema::new("zone_id", AttributeType::String))
            .attribute(AttributeSchema::new("status", AttributeType::String))
            .attribute(AttributeSchema::new("image_id", AttributeType::String))
            .attribute(AttributeSchema::new("ipv4_address", AttributeType::String).validate(Validator::Ip))
            .attribute(AttributeSchema::new("resource_group_id", AttributeType::String))
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = InstanceFilter {
            ids: d.get_string_list("ids"),
            zone_id: d.get_string("zone_id"),
            status: d.get_string("status"),
            image_id: d.get_string("image_id"),
            ipv4_address: d.get_string("ipv4_address"),
            resource_group_id: d.get_string("resource_group_id"),
            ..Default::default()
        };
        let instances = meta.zec().describe_instances_by_filter(ctx, &filter).await?;
        let entries = instances
            .iter()
            .filter(|instance| names.matches(&instance.instance_name))
            .map(|instance| (instance.instance_id.clone(), project(instance)))
            .collect();
        publish(d, "instances", entries).await
    }
}
