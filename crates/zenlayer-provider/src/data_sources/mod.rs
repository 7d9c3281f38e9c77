//! Data-source handlers
//!
//! Every query follows the same shape: build a filter from the
//! configuration, list every page, drop names rejected by `name_regex`,
//! then publish the projected list through [`publish`].

mod bandwidth_clusters;
mod resource_groups;
mod zec_auto_snapshot_policies;
mod zec_border_gateways;
mod zec_cidrs;
mod zec_disks;
mod zec_eips;
mod zec_instances;
mod zec_nat_gateways;
mod zec_security_groups;
mod zec_snapshots;
mod zec_subnets;
mod zec_vnics;
mod zec_vpc_routes;
mod zec_vpcs;

pub use bandwidth_clusters::BandwidthClustersDataSource;
pub use resource_groups::ResourceGroupsDataSource;
pub use zec_auto_snapshot_policies::AutoSnapshotPoliciesDataSource;
pub use zec_border_gateways::BorderGatewaysDataSource;
pub use zec_cidrs::CidrsDataSource;
pub use zec_disks::DisksDataSource;
pub use zec_eips::EipsDataSource;
pub use zec_instances::InstancesDataSource;
pub use zec_nat_gateways::NatGatewaysDataSource;
pub use zec_security_groups::SecurityGroupsDataSource;
pub use zec_snapshots::SnapshotsDataSource;
pub use zec_subnets::SubnetsDataSource;
pub use zec_vnics::VnicsDataSource;
pub use zec_vpc_routes::VpcRoutesDataSource;
pub use zec_vpcs::VpcsDataSource;

use serde_json::Value;
use std::path::Path;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, NameFilter, ResourceData, ResourceSchema, Result, Validator, hash_ids,
    write_output_file,
};

/// Schema with the attributes shared by every query
pub(crate) fn query_schema(kind: String, list_key: &'static str, named: bool) -> ResourceSchema {
    let schema = ResourceSchema::new(kind)
        .attribute(
            AttributeSchema::new("ids", AttributeType::List)
                .optional_computed()
                .with_description("Restrict the query to these IDs; holds the result IDs afterwards"),
        )
        .attribute(
            AttributeSchema::new("result_output_file", AttributeType::String)
                .with_description("Write the result list to this file as JSON"),
        )
        .attribute(AttributeSchema::new(list_key, AttributeType::List).computed());
    if named {
        schema.attribute(
            AttributeSchema::new("name_regex", AttributeType::String)
                .validate(Validator::NotEmpty)
                .with_description("Keep only entries whose name matches"),
        )
    } else {
        schema
    }
}

pub(crate) fn name_filter(d: &ResourceData) -> Result<NameFilter> {
    NameFilter::new(d.get_opt_str("name_regex").as_deref())
}

/// Store the `(id, entry)` pairs under `list_key` and derive the result id.
///
/// Order is kept as returned by the API, so the hash is stable for an
/// unchanged result set.
pub(crate) async fn publish(d: &mut ResourceData, list_key: &str, entries: Vec<(String, Value)>) -> Result<()> {
    let (ids, list): (Vec<String>, Vec<Value>) = entries.into_iter().unzip();
    tracing::debug!(list_key, count = ids.len(), "data source query finished");

    if let Some(path) = d.get_opt_str("result_output_file") {
        write_output_file(Path::new(&path), &list).await?;
    }
    d.set_id(hash_ids(&ids));
    d.set("ids", ids);
    d.set(list_key, list);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_publish_sets_hash_id_and_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/vpcs.json");
        let mut config = zenlayer_cloud::Attributes::new();
        config.insert("result_output_file".to_string(), json!(path.to_string_lossy()));
        let mut d = ResourceData::new(config);

        let entries = vec![
            ("vpc-1".to_string(), json!({"id": "vpc-1"})),
            ("vpc-2".to_string(), json!({"id": "vpc-2"})),
        ];
        publish(&mut d, "vpcs", entries).await.unwrap();

        assert_eq!(d.id(), hash_ids(&["vpc-1", "vpc-2"]));
        assert_eq!(d.get_string_list("ids"), vec!["vpc-1", "vpc-2"]);
        assert_eq!(d.get_list("vpcs").len(), 2);

        let written: Vec<Value> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written[1]["id"], "vpc-2");
    }

    #[tokio::test]
    async fn test_publish_empty_result() {
        let mut d = ResourceData::new(zenlayer_cloud::Attributes::new());
        publish(&mut d, "vpcs", Vec::new()).await.unwrap();
        assert_eq!(d.id(), "0");
        assert!(d.get_list("vpcs").is_empty());
    }
}
