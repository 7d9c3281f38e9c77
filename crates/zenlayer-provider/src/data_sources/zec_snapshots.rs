//! `zenlayercloud_zec_snapshots`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::zec::SnapshotFilter;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::{
    AttributeSchema, AttributeType, DataSource, OpContext, ResourceData, ResourceSchema, Result, Validator,
};
use zenlayer_sdk::zec::SnapshotInfo;

pub struct SnapshotsDataSource;

fn project(snapshot: &SnapshotInfo) -> Value {
    json!({
        "id": snapshot.snapshot_id,
        "name": snapshot.snapshot_name,
        "zone_id": snapshot.zone_id,
        "disk_id": snapshot.disk_id,
        "status": snapshot.status,
        "snapshot_type": snapshot.snapshot_type,
        "retention_time": snapshot.retention_time,
        "resource_group_id": snapshot.resource_group_id,
        "resource_group_name": snapshot.resource_group_name,
        "create_time": snapshot.create_time,
    })
}

#[async_trait]
impl DataSource<ZenlayerClient> for SnapshotsDataSource {
    fn type_name(&self) -> &'static str {
        "zec_snapshots"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "snapshots", true)
            .with_description("Query disk snapshots")
            .attribute(AttributeSchema::new("zone_id", AttributeType::String))
            .attribute(AttributeSchema::new("disk_ids", AttributeType::List))
            .attribute(AttributeSchema::new("status", AttributeType::String))
            .attribute(
                AttributeSchema::new("snapshot_type", AttributeType::String)
                    .validate(Validator::StringInSlice(&["Auto", "Manual"])),
            )
            .attribute(AttributeSchema::new("resource_group_id", AttributeType::String))
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = SnapshotFilter {
            ids: d.get_string_list("ids"),
            zone_id: d.get_string("zone_id"),
            disk_ids: d.get_string_list("disk_ids"),
            status: d.get_string("status"),
            snapshot_type: d.get_string("snapshot_type"),
            resource_group_id: d.get_string("resource_group_id"),
            ..Default::default()
        };
        let snapshots = meta.zec().describe_snapshots_by_filter(ctx, &filter).await?;
        let entries = snapshots
            .iter()
            .filter(|snapshot| names.matches(&snapshot.snapshot_name))
            .map(|snapshot| (snapshot.snapshot_id.clone(), project(snapshot)))
            .collect();
        publish(d, "snapshots", entries).await
    }
}
