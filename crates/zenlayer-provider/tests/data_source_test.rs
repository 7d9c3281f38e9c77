mod common;

use common::{FakeCloud, attrs, cancel};
use serde_json::{Value, json};
use zenlayer_cloud::hash_ids;

fn nat(id: &str, name: &str) -> Value {
    json!({
        "natGatewayId": id,
        "name": name,
        "regionId": "asia-east-1",
        "vpcId": "vpc-1",
        "status": "RUNNING",
    })
}

#[tokio::test(start_paused = true)]
async fn test_nat_gateways_filtered_by_name() {
    let cloud = FakeCloud::new();
    cloud.insert("DescribeNatGateways", nat("nat-a", "prod-a"));
    cloud.insert("DescribeNatGateways", nat("nat-b", "prod-b"));
    cloud.insert("DescribeNatGateways", nat("nat-c", "dev-a"));
    let provider = cloud.provider();

    let resp = provider
        .read_data_source(
            "zenlayercloud_zec_nat_gateways",
            attrs(json!({"name_regex": "^prod-"})),
            cancel(),
        )
        .await;
    assert!(resp.is_success(), "{:?}", resp.diagnostics);
    assert_eq!(resp.id, hash_ids(&["nat-a", "nat-b"]));
    assert_eq!(resp.state["ids"], json!(["nat-a", "nat-b"]));

    let gateways = resp.state["nat_gateways"].as_array().unwrap();
    assert_eq!(gateways.len(), 2);
    assert_eq!(gateways[0]["id"], json!("nat-a"));
    assert_eq!(gateways[1]["name"], json!("prod-b"));
}

#[tokio::test(start_paused = true)]
async fn test_ids_restrict_the_query() {
    let cloud = FakeCloud::new();
    cloud.insert("DescribeNatGateways", nat("nat-a", "prod-a"));
    cloud.insert("DescribeNatGateways", nat("nat-b", "prod-b"));
    let provider = cloud.provider();

    let resp = provider
        .read_data_source(
            "zenlayercloud_zec_nat_gateways",
            attrs(json!({"ids": ["nat-b"]})),
            cancel(),
        )
        .await;
    assert!(resp.is_success());
    assert_eq!(resp.state["ids"], json!(["nat-b"]));
    assert_eq!(cloud.bodies("DescribeNatGateways")[0]["natGatewayIds"], json!(["nat-b"]));
}

#[tokio::test(start_paused = true)]
async fn test_every_page_is_fetched() {
    let cloud = FakeCloud::new();
    for i in 0..250 {
        cloud.insert(
            "DescribeVpcs",
            json!({"vpcId": format!("vpc-{i:03}"), "name": format!("vpc {i}"), "cidrBlock": "10.0.0.0/16"}),
        );
    }
    let provider = cloud.provider();

    let resp = provider
        .read_data_source("zenlayercloud_zec_vpcs", attrs(json!({})), cancel())
        .await;
    assert!(resp.is_success(), "{:?}", resp.diagnostics);

    let vpcs = resp.state["vpcs"].as_array().unwrap();
    assert_eq!(vpcs.len(), 250);
    assert_eq!(vpcs[0]["id"], json!("vpc-000"));
    assert_eq!(vpcs[249]["id"], json!("vpc-249"));
    assert_eq!(cloud.bodies("DescribeVpcs").len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_failed_page_fails_the_query() {
    let cloud = FakeCloud::new();
    for i in 0..150 {
        cloud.insert("DescribeVpcs", json!({"vpcId": format!("vpc-{i}")}));
    }
    let provider = cloud.provider();
    // First page succeeds, the second fails terminally
    let mut calls = 0;
    cloud.on("DescribeVpcs", move |body, _| {
        calls += 1;
        if calls == 1 {
            let page: Vec<Value> = (0..100).map(|i| json!({"vpcId": format!("vpc-{i}")})).collect();
            return Ok(json!({"totalCount": 150, "dataSet": page}));
        }
        assert_eq!(body["pageNum"], json!(2));
        Err(zenlayer_sdk::SdkError::api("INVALID_PARAMETER", "bad page"))
    });

    let resp = provider
        .read_data_source("zenlayercloud_zec_vpcs", attrs(json!({})), cancel())
        .await;
    assert!(!resp.is_success());
}

#[tokio::test(start_paused = true)]
async fn test_empty_result_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eips.json");
    let cloud = FakeCloud::new();
    let provider = cloud.provider();

    let resp = provider
        .read_data_source(
            "zenlayercloud_zec_eips",
            attrs(json!({"result_output_file": path.to_str().unwrap()})),
            cancel(),
        )
        .await;
    assert!(resp.is_success(), "{:?}", resp.diagnostics);
    assert_eq!(resp.id, "0");
    assert_eq!(resp.state["eips"], json!([]));

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, json!([]));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_name_regex() {
    let cloud = FakeCloud::new();
    let provider = cloud.provider();

    let resp = provider
        .read_data_source("zenlayercloud_zec_vpcs", attrs(json!({"name_regex": "(unclosed"})), cancel())
        .await;
    assert!(!resp.is_success());
    assert!(cloud.actions().is_empty());
}
