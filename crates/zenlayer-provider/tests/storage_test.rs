mod common;

use chrono::{TimeDelta, Utc};
use common::{FakeCloud, attrs, cancel};
use serde_json::{Value, json};
use zenlayer_cloud::Attributes;

const DISK: &str = "zenlayercloud_zec_disk";
const SNAPSHOT: &str = "zenlayercloud_zec_snapshot";
const POLICY: &str = "zenlayercloud_zec_auto_snapshot_policy";

fn disk_in_use(cloud: &FakeCloud, size: i64) {
    cloud.insert(
        "DescribeDisks",
        json!({
            "diskId": "disk-1",
            "diskName": "data",
            "zoneId": "asia-east-1a",
            "diskType": "DATA",
            "diskSize": size,
            "diskCategory": "Standard NVMe SSD",
            "instanceId": "ins-1",
            "status": "IN_USE",
        }),
    );
}

fn disk_state(size: i64) -> Attributes {
    attrs(json!({
        "name": "data",
        "zone_id": "asia-east-1a",
        "disk_size": size,
        "disk_category": "Standard NVMe SSD",
        "force_delete": false,
        "status": "IN_USE",
    }))
}

fn disk_config(size: i64) -> Attributes {
    attrs(json!({"name": "data", "zone_id": "asia-east-1a", "disk_size": size}))
}

#[tokio::test(start_paused = true)]
async fn test_disk_grows_in_place() {
    let cloud = FakeCloud::new();
    disk_in_use(&cloud, 20);
    cloud.on("ResizeDisk", |body, world| {
        world.set("disk-1", "diskSize", body["diskSize"].clone());
        world.script("disk-1", &["CHANGING", "CHANGING", "IN_USE"]);
        Ok(json!({}))
    });
    let provider = cloud.provider();

    let updated = provider
        .update(DISK, "disk-1", disk_state(20), disk_config(40), cancel())
        .await;
    assert!(updated.is_success(), "{:?}", updated.diagnostics);
    assert_eq!(cloud.mutations(), vec!["ResizeDisk"]);
    assert_eq!(cloud.bodies("ResizeDisk")[0]["diskSize"], json!(40));

    let state = updated.state.unwrap();
    assert_eq!(state["disk_size"], json!(40));
    assert_eq!(state["status"], json!("IN_USE"));
}

#[tokio::test(start_paused = true)]
async fn test_disk_never_shrinks() {
    let cloud = FakeCloud::new();
    disk_in_use(&cloud, 40);
    let provider = cloud.provider();

    let plan = provider.plan(DISK, Some(("disk-1", &disk_state(40))), &disk_config(30));
    assert!(!plan.is_success());

    // Below the minimum size the schema already refuses it
    let updated = provider
        .update(DISK, "disk-1", disk_state(40), disk_config(10), cancel())
        .await;
    assert!(!updated.is_success());

    let updated = provider
        .update(DISK, "disk-1", disk_state(40), disk_config(30), cancel())
        .await;
    assert!(!updated.is_success());
    assert_eq!(updated.state.unwrap()["disk_size"], json!(40));
    assert!(cloud.mutations().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_failed_resize_keeps_prior_size() {
    let cloud = FakeCloud::new();
    disk_in_use(&cloud, 20);
    cloud.fail("ResizeDisk", zenlayer_sdk::SdkError::api("INVALID_DISK_SIZE", "quota exceeded"));
    let provider = cloud.provider();

    let updated = provider
        .update(DISK, "disk-1", disk_state(20), disk_config(40), cancel())
        .await;
    assert!(!updated.is_success());
    assert_eq!(updated.state.unwrap()["disk_size"], json!(20));
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_retention_checked_before_any_call() {
    let cloud = FakeCloud::new();
    let provider = cloud.provider();

    let soon = (Utc::now() + TimeDelta::hours(2)).to_rfc3339();
    let config = attrs(json!({"disk_id": "disk-1", "name": "nightly", "retention_time": soon}));
    let created = provider.create(SNAPSHOT, config, cancel()).await;

    assert!(!created.is_success());
    assert!(created.state.is_none());
    assert!(created.diagnostics[0].detail.contains("24 hours"));
    assert!(cloud.mutations().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_create_waits_for_available() {
    let cloud = FakeCloud::new();
    cloud.on("CreateSnapshot", |body, world| {
        world.insert(
            "DescribeSnapshots",
            json!({
                "snapshotId": "snap-1",
                "snapshotName": body["snapshotName"],
                "diskId": body["diskId"],
                "zoneId": "asia-east-1a",
            }),
        );
        world.script("snap-1", &["CREATING", "AVAILABLE"]);
        Ok(json!({"snapshotId": "snap-1"}))
    });
    let provider = cloud.provider();

    let later = (Utc::now() + TimeDelta::days(7)).to_rfc3339();
    let config = attrs(json!({"disk_id": "disk-1", "name": "nightly", "retention_time": later}));
    let created = provider.create(SNAPSHOT, config, cancel()).await;

    assert!(created.is_success(), "{:?}", created.diagnostics);
    assert_eq!(created.id(), Some("snap-1"));
    assert_eq!(created.state.unwrap()["status"], json!("AVAILABLE"));
}

#[test]
fn test_snapshot_policy_bounds() {
    let cloud = FakeCloud::new();
    let provider = cloud.provider();
    let policy = |week_days: Value, hours: Value, retention: Value| {
        attrs(json!({
            "zone_id": "asia-east-1a",
            "name": "daily",
            "repeat_week_days": week_days,
            "hours": hours,
            "retention_days": retention,
        }))
    };

    assert!(provider.validate(POLICY, &policy(json!([1, 7]), json!([0, 23]), json!(-1))).is_empty());
    assert!(provider.validate(POLICY, &policy(json!([1]), json!([3]), json!(30))).is_empty());
    assert!(!provider.validate(POLICY, &policy(json!([0]), json!([3]), json!(7))).is_empty());
    assert!(!provider.validate(POLICY, &policy(json!([1]), json!([24]), json!(7))).is_empty());
    assert!(!provider.validate(POLICY, &policy(json!([1]), json!([3]), json!(0))).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_disk_delete_stops_in_recycle_bin() {
    let cloud = FakeCloud::new();
    disk_in_use(&cloud, 20);
    cloud.on("DeleteDisk", |_, world| {
        world.script("disk-1", &["DELETING", "RECYCLING", "RECYCLED"]);
        Ok(json!({}))
    });
    let provider = cloud.provider();

    let deleted = provider.delete(DISK, "disk-1", disk_state(20), cancel()).await;
    assert!(deleted.is_success(), "{:?}", deleted.diagnostics);
    assert_eq!(cloud.mutations(), vec!["DeleteDisk"]);
    assert_eq!(cloud.world(|w| w.get("disk-1")).unwrap()["status"], json!("RECYCLED"));
}

#[tokio::test(start_paused = true)]
async fn test_disk_force_delete_releases_from_recycle_bin() {
    let cloud = FakeCloud::new();
    disk_in_use(&cloud, 20);
    let mut deletes = 0;
    cloud.on("DeleteDisk", move |_, world| {
        deletes += 1;
        if deletes == 1 {
            world.script("disk-1", &["DELETING", "RECYCLED"]);
        } else {
            world.remove("disk-1");
        }
        Ok(json!({}))
    });
    let provider = cloud.provider();

    let mut state = disk_state(20);
    state.insert("force_delete".into(), json!(true));
    let deleted = provider.delete(DISK, "disk-1", state, cancel()).await;
    assert!(deleted.is_success(), "{:?}", deleted.diagnostics);
    assert_eq!(cloud.mutations(), vec!["DeleteDisk", "DeleteDisk"]);
    assert!(cloud.world(|w| w.get("disk-1")).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_disk_delete_fails_on_unexpected_status() {
    let cloud = FakeCloud::new();
    disk_in_use(&cloud, 20);
    cloud.on("DeleteDisk", |_, world| {
        world.script("disk-1", &["DELETING", "AVAILABLE"]);
        Ok(json!({}))
    });
    let provider = cloud.provider();

    let mut state = disk_state(20);
    state.insert("force_delete".into(), json!(true));
    let deleted = provider.delete(DISK, "disk-1", state, cancel()).await;
    assert!(!deleted.is_success());
    assert!(deleted.diagnostics[0].detail.contains("AVAILABLE"), "{:?}", deleted.diagnostics);
    // Never reached the recycle bin, so nothing is released
    assert_eq!(cloud.mutations(), vec!["DeleteDisk"]);
}

#[tokio::test(start_paused = true)]
async fn test_read_of_recycled_disk_clears_id() {
    let cloud = FakeCloud::new();
    disk_in_use(&cloud, 20);
    cloud.script("disk-1", &["RECYCLED"]);
    let provider = cloud.provider();

    let read = provider.read(DISK, "disk-1", disk_state(20), cancel()).await;
    assert!(read.is_success(), "{:?}", read.diagnostics);
    assert!(read.state.is_none());
    assert!(read.diagnostics[0].summary.contains("RECYCLED"));
}
