mod common;

use common::{FakeCloud, attrs, cancel, not_found};
use serde_json::json;

const VPC: &str = "zenlayercloud_zec_vpc";
const SUBNET: &str = "zenlayercloud_zec_subnet";

#[tokio::test(start_paused = true)]
async fn test_vpc_create_then_read() {
    let cloud = FakeCloud::new();
    cloud.on("CreateVpc", |body, world| {
        world.insert(
            "DescribeVpcs",
            json!({
                "vpcId": "vpc-1",
                "name": body["name"],
                "cidrBlock": body["cidrBlock"],
                "mtu": body["mtu"],
                "isDefault": false,
                "securityGroupId": "sg-default",
            }),
        );
        Ok(json!({"vpcId": "vpc-1"}))
    });
    let provider = cloud.provider();

    let config = attrs(json!({
        "name": "tf-vpc",
        "cidr_block": "10.0.0.0/16",
        "mtu": 1500,
        "enable_ipv6": false,
    }));
    let created = provider.create(VPC, config, cancel()).await;
    assert!(created.is_success(), "{:?}", created.diagnostics);
    assert_eq!(created.id(), Some("vpc-1"));

    let state = created.state.unwrap();
    assert_eq!(state["is_default"], json!(false));
    assert_eq!(state["ipv6_cidr_block"], json!(""));
    assert_eq!(state["mtu"], json!(1500));
    assert_eq!(state["security_group_id"], json!("sg-default"));
    // IPv6 stays off, so no follow-up modify
    assert_eq!(cloud.mutations(), vec!["CreateVpc"]);
    assert_eq!(cloud.bodies("CreateVpc")[0]["cidrBlock"], json!("10.0.0.0/16"));

    let read = provider.read(VPC, "vpc-1", state.clone(), cancel()).await;
    assert!(read.is_success());
    assert_eq!(read.state.unwrap()["name"], json!("tf-vpc"));
}

#[tokio::test(start_paused = true)]
async fn test_vpc_deleted_remotely_is_forgotten() {
    let cloud = FakeCloud::new();
    let provider = cloud.provider();

    let read = provider
        .read(VPC, "vpc-gone", attrs(json!({"name": "tf-vpc"})), cancel())
        .await;
    assert!(read.is_success());
    assert!(read.state.is_none());
    assert_eq!(read.diagnostics.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_vpc_delete_is_idempotent() {
    let cloud = FakeCloud::new();
    cloud.fail("DeleteVpc", not_found("INVALID_VPC_NOT_FOUND"));
    let provider = cloud.provider();

    let deleted = provider
        .delete(VPC, "vpc-1", attrs(json!({"name": "tf-vpc"})), cancel())
        .await;
    assert!(deleted.is_success(), "{:?}", deleted.diagnostics);
    assert!(deleted.state.is_none());
    assert_eq!(cloud.mutations(), vec!["DeleteVpc"]);
}

#[tokio::test(start_paused = true)]
async fn test_vpc_enable_ipv6_in_place() {
    let cloud = FakeCloud::new();
    cloud.insert(
        "DescribeVpcs",
        json!({"vpcId": "vpc-1", "name": "tf-vpc", "cidrBlock": "10.0.0.0/16", "mtu": 1500}),
    );
    cloud.on("ModifyVpcAttribute", |body, world| {
        world.set("vpc-1", "ipv6CidrBlock", json!("2001:db8::/48"));
        assert_eq!(body["enableIPv6"], json!(true));
        Ok(json!({}))
    });
    let provider = cloud.provider();

    let prior = attrs(json!({
        "name": "tf-vpc",
        "cidr_block": "10.0.0.0/16",
        "mtu": 1500,
        "enable_ipv6": false,
    }));
    let config = attrs(json!({
        "name": "tf-vpc",
        "cidr_block": "10.0.0.0/16",
        "mtu": 1500,
        "enable_ipv6": true,
    }));

    let plan = provider.plan(VPC, Some(("vpc-1", &prior)), &config);
    assert!(plan.requires_replace.is_empty());

    let updated = provider.update(VPC, "vpc-1", prior, config, cancel()).await;
    assert!(updated.is_success(), "{:?}", updated.diagnostics);
    let state = updated.state.unwrap();
    assert_eq!(state["enable_ipv6"], json!(true));
    assert_eq!(state["ipv6_cidr_block"], json!("2001:db8::/48"));
    assert_eq!(cloud.mutations(), vec!["ModifyVpcAttribute"]);
}

#[tokio::test(start_paused = true)]
async fn test_subnet_gains_ipv6_in_place() {
    let cloud = FakeCloud::new();
    cloud.insert(
        "DescribeSubnets",
        json!({
            "subnetId": "subnet-1",
            "name": "web",
            "regionId": "asia-east-1",
            "vpcId": "vpc-1",
            "cidrBlock": "10.0.1.0/24",
            "stackType": "IPv4",
        }),
    );
    cloud.on("ModifySubnetStackType", |body, world| {
        world.set("subnet-1", "stackType", body["stackType"].clone());
        world.set("subnet-1", "ipv6Type", body["ipv6Type"].clone());
        world.set("subnet-1", "ipv6CidrBlock", json!("2001:db8:0:1::/64"));
        Ok(json!({}))
    });
    let provider = cloud.provider();

    let prior = attrs(json!({
        "name": "web",
        "region_id": "asia-east-1",
        "vpc_id": "vpc-1",
        "cidr_block": "10.0.1.0/24",
        "ipv6_type": "",
        "ip_stack_type": "IPv4",
    }));
    let config = attrs(json!({
        "name": "web",
        "region_id": "asia-east-1",
        "vpc_id": "vpc-1",
        "cidr_block": "10.0.1.0/24",
        "ipv6_type": "Public",
    }));

    let plan = provider.plan(SUBNET, Some(("subnet-1", &prior)), &config);
    assert!(plan.requires_replace.is_empty(), "{:?}", plan.requires_replace);

    let updated = provider.update(SUBNET, "subnet-1", prior, config, cancel()).await;
    assert!(updated.is_success(), "{:?}", updated.diagnostics);
    assert_eq!(cloud.mutations(), vec!["ModifySubnetStackType"]);
    assert_eq!(cloud.bodies("ModifySubnetStackType")[0]["stackType"], json!("IPv4_IPv6"));

    let state = updated.state.unwrap();
    assert_eq!(state["ip_stack_type"], json!("IPv4_IPv6"));
    assert_eq!(state["ipv6_type"], json!("Public"));

    // Taking IPv6 away again is a replacement
    let removed = attrs(json!({
        "name": "web",
        "region_id": "asia-east-1",
        "vpc_id": "vpc-1",
        "cidr_block": "10.0.1.0/24",
        "ipv6_type": null,
    }));
    let plan = provider.plan(SUBNET, Some(("subnet-1", &state)), &removed);
    assert!(plan.diagnostics.is_empty(), "{:?}", plan.diagnostics);
    assert!(plan.requires_replace.contains(&"ipv6_type".to_string()));
}

#[test]
fn test_subnet_ipv6_left_out_of_config_is_a_removal() {
    let cloud = FakeCloud::new();
    let provider = cloud.provider();

    let prior = attrs(json!({
        "name": "web",
        "region_id": "asia-east-1",
        "vpc_id": "vpc-1",
        "cidr_block": "10.0.1.0/24",
        "ipv6_type": "Public",
        "ip_stack_type": "IPv4_IPv6",
    }));
    let config = attrs(json!({
        "name": "web",
        "region_id": "asia-east-1",
        "vpc_id": "vpc-1",
        "cidr_block": "10.0.1.0/24",
    }));

    let plan = provider.plan(SUBNET, Some(("subnet-1", &prior)), &config);
    assert!(plan.diagnostics.is_empty(), "{:?}", plan.diagnostics);
    assert!(plan.requires_replace.contains(&"ipv6_type".to_string()));
    assert!(cloud.actions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_subnet_needs_an_address_family() {
    let cloud = FakeCloud::new();
    let provider = cloud.provider();

    let config = attrs(json!({"name": "web", "region_id": "asia-east-1", "vpc_id": "vpc-1"}));
    let created = provider.create(SUBNET, config, cancel()).await;
    assert!(!created.is_success());
    assert!(cloud.actions().is_empty());
}
