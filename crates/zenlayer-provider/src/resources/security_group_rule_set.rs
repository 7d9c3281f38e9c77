//! `zenlayercloud_zec_security_group_rule_set`
//!
//! Owns every rule of one security group. Rules are written with
//! `ConfigSecurityGroupRules`, which replaces the whole set.

use super::{forget, kind};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use serde_json::{Value, json};
use zenlayer_cloud::schema::is_port_spec;
use zenlayer_cloud::{
    Attributes, AttributeSchema, AttributeType, OpContext, Resource, ResourceData, ResourceSchema, Result, Rule,
};
use zenlayer_sdk::zec::{ConfigSecurityGroupRulesRequest, RuleInfo};

const DIRECTIONS: &[&str] = &["ingress", "egress"];
const POLICIES: &[&str] = &["accept", "drop"];
const PROTOCOLS: &[&str] = &["tcp", "udp", "icmp", "gre", "all"];
/// Port value for protocols without ports
const ANY_PORT: &str = "-1";

pub struct SecurityGroupRuleSetResource;

fn check_rule(direction: &str, rule: &Value) -> std::result::Result<(), String> {
    let field = |key: &str| rule.get(key).and_then(Value::as_str).unwrap_or_default();
    let (policy, protocol, port) = (field("policy"), field("protocol"), field("port"));
    if !POLICIES.contains(&policy) {
        return Err(format!("{direction} rule policy must be one of {POLICIES:?}, got {policy:?}"));
    }
    if !PROTOCOLS.contains(&protocol) {
        return Err(format!("{direction} rule protocol must be one of {PROTOCOLS:?}, got {protocol:?}"));
    }
    if field("cidr_block").is_empty() {
        return Err(format!("{direction} rule requires cidr_block"));
    }
    match protocol {
        "tcp" | "udp" if !is_port_spec(port) => Err(format!(
            "{direction} {protocol} rule port must be a port or range, got {port:?}"
        )),
        "icmp" | "gre" | "all" if port != ANY_PORT => Err(format!(
            "{direction} {protocol} rule port must be {ANY_PORT}, got {port:?}"
        )),
        _ => Ok(()),
    }
}

fn check_rules(config: &Attributes) -> std::result::Result<(), String> {
    for direction in DIRECTIONS {
        if let Some(Value::Array(rules)) = config.get(*direction) {
            rules.iter().try_for_each(|rule| check_rule(direction, rule))?;
        }
    }
    Ok(())
}

fn to_rule_info(direction: &str, rule: &Value) -> RuleInfo {
    let field = |key: &str| rule.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
    RuleInfo {
        direction: direction.to_string(),
        policy: field("policy"),
        priority: rule.get("priority").and_then(Value::as_i64).unwrap_or(1),
        ip_protocol: field("protocol"),
        port_range: field("port"),
        cidr_ip: field("cidr_block"),
        description: field("description"),
    }
}

fn from_rule_info(rule: &RuleInfo) -> Value {
    json!({
        "policy": rule.policy,
        "protocol": rule.ip_protocol,
        "port": rule.port_range,
        "cidr_block": rule.cidr_ip,
        "priority": rule.priority,
        "description": rule.description,
    })
}

fn rules_from_data(d: &ResourceData) -> Vec<RuleInfo> {
    DIRECTIONS
        .iter()
        .flat_map(|direction| {
            d.get_list(direction)
                .into_iter()
                .map(move |rule| to_rule_info(direction, &rule))
        })
        .collect()
}

async fn configure(ctx: &OpContext, meta: &ZenlayerClient, security_group_id: &str, rules: Vec<RuleInfo>) -> Result<()> {
    tracing::info!(security_group_id, rules = rules.len(), "configuring security group rules");
    let request = ConfigSecurityGroupRulesRequest {
        security_group_id: security_group_id.to_string(),
        rule_infos: rules,
    };
    meta.zec().send(ctx, &request).await?;
    Ok(())
}

#[async_trait]
impl Resource<ZenlayerClient> for SecurityGroupRuleSetResource {
    fn type_name(&self) -> &'static str {
        "zec_security_group_rule_set"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Complete ingress and egress rule set of a security group")
            .attribute(
                AttributeSchema::new("security_group_id", AttributeType::String)
                    .required()
                    .force_new(),
            )
            .attribute(
                AttributeSchema::new("ingress", AttributeType::Set)
                    .with_description("Rules {policy, protocol, port, cidr_block, priority, description}"),
            )
            .attribute(AttributeSchema::new("egress", AttributeType::Set))
            .rule(Rule::Custom(check_rules))
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let security_group_id = d.get_string("security_group_id");
        configure(ctx, meta, &security_group_id, rules_from_data(d)).await?;
        d.set_id(security_group_id);
        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let security_group_id = d.id().to_string();
        let Some(group) = meta.zec().describe_security_group_by_id(ctx, &security_group_id).await? else {
            forget(d, "security group");
            return Ok(());
        };
        d.set("security_group_id", group.security_group_id.as_str());
        for direction in DIRECTIONS {
            let rules: Vec<Value> = group
                .rule_infos
                .iter()
                .filter(|rule| rule.direction == *direction)
                .map(from_rule_info)
                .collect();
            d.set(direction, rules);
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        if d.has_changes(DIRECTIONS) {
            let security_group_id = d.id().to_string();
            configure(ctx, meta, &security_group_id, rules_from_data(d)).await?;
            d.commit(DIRECTIONS);
        }
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let security_group_id = d.id().to_string();
        let request = ConfigSecurityGroupRulesRequest {
            security_group_id,
            rule_infos: Vec::new(),
        };
        meta.zec().send_unless_gone(ctx, &request).await?;
        Ok(())
    }
}
