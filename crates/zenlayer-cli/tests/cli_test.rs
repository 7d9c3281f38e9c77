use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn zlc() -> Command {
    let mut cmd = Command::cargo_bin("zlc").unwrap();
    cmd.env_remove("ACCESS_KEY_ID")
        .env_remove("ACCESS_KEY_PASSWORD")
        .env("ZENLAYER_CREDENTIALS_FILE", "/nonexistent/zenlayer/credentials.yaml")
        .env("HOME", "/nonexistent")
        .env("XDG_CONFIG_HOME", "/nonexistent");
    cmd
}

/// ヘルプにサブコマンドが並ぶことを確認
#[test]
fn test_cli_help() {
    zlc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("kinds"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("query"));
}

#[test]
fn test_cli_version() {
    zlc()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zenlayer-cli"));
}

#[test]
fn test_kinds_lists_resources_and_data_sources() {
    zlc()
        .arg("kinds")
        .assert()
        .success()
        .stdout(predicate::str::contains("zenlayercloud_zec_instance"))
        .stdout(predicate::str::contains("zenlayercloud_zec_nat_gateways"))
        .stdout(predicate::str::contains("zenlayercloud_bandwidth_clusters"));
}

#[test]
fn test_schema_shows_force_new() {
    zlc()
        .args(["schema", "zenlayercloud_zec_vpc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cidr_block"))
        .stdout(predicate::str::contains("forces new"));
}

#[test]
fn test_schema_unknown_kind() {
    zlc()
        .args(["schema", "zenlayercloud_zec_teapot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown kind"));
}

#[test]
fn test_validate_file() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("vpc.json");
    fs::write(&good, r#"{"name": "tf-vpc", "cidr_block": "10.0.0.0/16"}"#).unwrap();
    zlc()
        .args(["validate", "zenlayercloud_zec_vpc", "--file"])
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));

    let bad = dir.path().join("cidr.json");
    fs::write(
        &bad,
        r#"{"region_id": "asia-east-1", "name": "edge", "netmask": 24, "network_type": "BGP"}"#,
    )
    .unwrap();
    zlc()
        .args(["validate", "zenlayercloud_zec_cidr", "--file"])
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("netmask"));
}

#[test]
fn test_validate_stdin() {
    zlc()
        .args(["validate", "zenlayercloud_zec_vpc_route"])
        .write_stdin(
            r#"{"vpc_id": "vpc-1", "ip_version": "IPv4", "route_type": "RouteTypePolicy",
                "destination_cidr_block": "10.1.0.0/16", "next_hop_id": "nic-1", "name": "policy"}"#,
        )
        .assert()
        .failure()
        .stderr(predicate::str::contains("source_ip"));
}

#[test]
fn test_read_requires_credentials() {
    zlc()
        .args(["read", "zenlayercloud_zec_vpc", "vpc-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("access_key_id"));
}
