mod common;

use common::{FakeCloud, attrs, cancel};
use serde_json::json;

const ASSOCIATION: &str = "zenlayercloud_zec_eip_association";

fn unbound_eip(cloud: &FakeCloud) {
    cloud.insert(
        "DescribeEips",
        json!({
            "eipId": "eip-1",
            "regionId": "asia-east-1",
            "publicIpAddresses": ["203.0.113.10"],
            "status": "UNBIND",
        }),
    );
}

#[tokio::test(start_paused = true)]
async fn test_associate_then_release_eip() {
    let cloud = FakeCloud::new();
    unbound_eip(&cloud);
    cloud.on("AssociateEipAddress", |body, world| {
        world.set("eip-1", "associatedId", body["associatedId"].clone());
        world.set("eip-1", "associatedType", body["associatedType"].clone());
        world.set("eip-1", "privateIpAddress", body["privateIpAddress"].clone());
        world.set("eip-1", "bindType", body["bindType"].clone());
        world.script("eip-1", &["UNBIND", "BINDING", "BINDED"]);
        Ok(json!({}))
    });
    cloud.on("UnassociateEipAddress", |_, world| {
        world.set("eip-1", "associatedId", json!(""));
        world.set("eip-1", "associatedType", json!(""));
        world.script("eip-1", &["UNBINDING", "UNBIND"]);
        Ok(json!({}))
    });
    let provider = cloud.provider();

    let config = attrs(json!({
        "eip_id": "eip-1",
        "associated_id": "nic-1",
        "associated_type": "NIC",
        "private_ip_address": "10.0.1.7",
        "bind_type": "FullNat",
    }));
    let created = provider.create(ASSOCIATION, config, cancel()).await;
    assert!(created.is_success(), "{:?}", created.diagnostics);
    assert_eq!(created.id(), Some("eip-1:nic-1:NIC"));

    let state = created.state.unwrap();
    assert_eq!(state["private_ip_address"], json!("10.0.1.7"));
    assert_eq!(state["bind_type"], json!("FullNat"));
    assert_eq!(cloud.bodies("AssociateEipAddress")[0]["eipIds"], json!(["eip-1"]));

    let deleted = provider.delete(ASSOCIATION, "eip-1:nic-1:NIC", state, cancel()).await;
    assert!(deleted.is_success(), "{:?}", deleted.diagnostics);
    assert_eq!(cloud.mutations(), vec!["AssociateEipAddress", "UnassociateEipAddress"]);
    assert_eq!(cloud.world(|w| w.get("eip-1")).unwrap()["status"], json!("UNBIND"));
}

#[tokio::test(start_paused = true)]
async fn test_association_moved_elsewhere_is_forgotten() {
    let cloud = FakeCloud::new();
    unbound_eip(&cloud);
    cloud.world(|w| {
        w.set("eip-1", "associatedId", json!("nat-9"));
        w.set("eip-1", "associatedType", json!("NAT"));
        w.set("eip-1", "status", json!("BINDED"));
    });
    let provider = cloud.provider();

    let read = provider
        .read(ASSOCIATION, "eip-1:nic-1:NIC", attrs(json!({"eip_id": "eip-1"})), cancel())
        .await;
    assert!(read.is_success());
    assert!(read.state.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_malformed_association_id() {
    let cloud = FakeCloud::new();
    let provider = cloud.provider();

    let imported = provider.import(ASSOCIATION, "eip-1", cancel()).await;
    assert!(!imported.is_success());
    assert!(cloud.actions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_eip_bandwidth_must_be_positive() {
    let cloud = FakeCloud::new();
    let provider = cloud.provider();

    let config = attrs(json!({
        "region_id": "asia-east-1",
        "name": "edge",
        "internet_charge_type": "ByBandwidth",
        "bandwidth": 0,
    }));
    assert!(!provider.validate("zenlayercloud_zec_eip", &config).is_empty());

    let config = attrs(json!({
        "region_id": "asia-east-1",
        "name": "edge",
        "internet_charge_type": "BandwidthCluster",
    }));
    let diagnostics = provider.validate("zenlayercloud_zec_eip", &config);
    assert!(diagnostics[0].detail.contains("bandwidth_cluster_id"));
}
