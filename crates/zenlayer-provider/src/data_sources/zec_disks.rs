//! `zenlayercloud_zec_disks`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::zec::DiskFilter;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::{
    AttributeSchema, AttributeType, DataSource, OpContext, ResourceData, ResourceSchema, Result, Validator,
};
use zenlayer_sdk::zec::DiskInfo;

pub struct DisksDataSource;

fn project(disk: &DiskInfo) -> Value {
    json!({
        "id": disk.disk_id,
        "name": disk.disk_name,
        "zone_id": disk.zone_id,
        "disk_type": disk.disk_type,
        "disk_size": disk.disk_size,
        "disk_category": disk.disk_category,
        "instance_id": disk.instance_id,
        "instance_name": disk.instance_name,
        "status": disk.status,
        "snapshot_id": disk.snapshot_id,
        "auto_snapshot_policy_id": disk.auto_snapshot_policy_id,
        "resource_group_id": disk.resource_group_id,
        "resource_group_name": disk.resource_group_name,
        "create_time": disk.create_time,
    })
}

#[async_trait]
impl DataSource<ZenlayerClient> for DisksDataSource {
    fn type_name(&self) -> &'static str {
        "zec_disks"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "disks", true)
            .with_description("Query disks")
            .attribute(AttributeSchema::new("zone_id", AttributeType::String))
            .attribute(AttributeSchema::new("instance_id", AttributeType::String))
            .attribute(AttributeSchema::new("status", AttributeType::String))
            .attribute(
                AttributeSchema::new("disk_type", AttributeType::String)
                    .validate(Validator::StringInSlice(&["SYSTEM", "DATA"])),
            )
            .attribute(AttributeSchema::new("disk_category", AttributeType::String))
            .attribute(AttributeSchema::new("resource_group_id", AttributeType::String))
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = DiskFilter {
            ids: d.get_string_list("ids"),
            zone_id: d.get_string("zone_id"),
            instance_id: d.get_string("instance_id"),
            status: d.get_string("status"),
            disk_type: d.get_string("disk_type"),
            disk_category: d.get_string("disk_category"),
            resource_group_id: d.get_string("resource_group_id"),
            ..Default::default()
        };
        let disks = meta.zec().describe_disks_by_filter(ctx, &filter).await?;
        let entries = disks
            .iter()
            .filter(|disk| names.matches(&disk.disk_name))
            .map(|disk| (disk.disk_id.clone(), project(disk)))
            .collect();
        publish(d, "disks", entries).await
    }
}
