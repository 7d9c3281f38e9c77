//! `zenlayercloud_zec_security_groups`

use super::{name_filter, publish, query_schema};
use crate::client::ZenlayerClient;
use crate::resources::kind;
use crate::service::zec::SecurityGroupFilter;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::{DataSource, OpContext, ResourceData, ResourceSchema, Result};
use zenlayer_sdk::zec::SecurityGroupInfo;

pub struct SecurityGroupsDataSource;

fn project(group: &SecurityGroupInfo) -> Value {
    let rules: Vec<Value> = group
        .rule_infos
        .iter()
        .map(|rule| {
            json!({
                "direction": rule.direction,
                "policy": rule.policy,
                "priority": rule.priority,
                "protocol": rule.ip_protocol,
                "port": rule.port_range,
                "cidr_block": rule.cidr_ip,
                "description": rule.description,
            })
        })
        .collect();
    json!({
        "id": group.security_group_id,
        "name": group.security_group_name,
        "description": group.description,
        "is_default": group.is_default,
        "vpc_ids": group.vpc_ids,
        "instance_ids": group.instance_ids,
        "rules": rules,
        "create_time": group.create_time,
    })
}

#[async_trait]
impl DataSource<ZenlayerClient> for SecurityGroupsDataSource {
    fn type_name(&self) -> &'static str {
        "zec_security_groups"
    }

    fn schema(&self) -> ResourceSchema {
        query_schema(kind(self.type_name()), "security_groups", true).with_description("Query security groups")
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let names = name_filter(d)?;
        let filter = SecurityGroupFilter {
            ids: d.get_string_list("ids"),
            ..Default::default()
        };
        let groups = meta.zec().describe_security_groups_by_filter(ctx, &filter).await?;
        let entries = groups
            .iter()
            .filter(|group| names.matches(&group.security_group_name))
            .map(|group| (group.security_group_id.clone(), project(group)))
            .collect();
        publish(d, "security_groups", entries).await
    }
}
