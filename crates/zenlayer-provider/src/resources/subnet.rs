//! `zenlayercloud_zec_subnet`

use super::{forget, kind};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use serde_json::Value;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, CloudError, OpContext, Resource, ResourceData, ResourceSchema, Result, Rule,
    Validator,
};
use zenlayer_sdk::zec::{
    CreateSubnetRequest, DeleteSubnetRequest, ModifySubnetAttributeRequest, ModifySubnetStackTypeRequest, SubnetInfo,
};

const IPV6_TYPES: &[&str] = &["Public", "Private"];

pub struct SubnetResource;

/// Stack type implied by which address families are configured
fn stack_type(has_ipv4: bool, has_ipv6: bool) -> &'static str {
    match (has_ipv4, has_ipv6) {
        (true, true) => "IPv4_IPv6",
        (false, true) => "IPv6",
        _ => "IPv4",
    }
}

fn non_empty(v: &Value) -> bool {
    v.as_str().is_some_and(|s| !s.is_empty())
}

fn set_subnet(d: &mut ResourceData, subnet: &SubnetInfo) {
    d.set("name", subnet.name.as_str());
    d.set("region_id", subnet.region_id.as_str());
    d.set("vpc_id", subnet.vpc_id.as_str());
    d.set("cidr_block", subnet.cidr_block.as_str());
    d.set("ipv6_type", subnet.ipv6_type.as_str());
    d.set("ipv6_cidr_block", subnet.ipv6_cidr_block.as_str());
    d.set("ip_stack_type", subnet.stack_type.as_str());
    d.set("is_default", subnet.is_default);
    d.set("create_time", subnet.create_time.as_str());
}

#[async_trait]
impl Resource<ZenlayerClient> for SubnetResource {
    fn type_name(&self) -> &'static str {
        "zec_subnet"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Regional subnet of a global VPC")
            .attribute(AttributeSchema::new("vpc_id", AttributeType::String).required().force_new())
            .attribute(AttributeSchema::new("region_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .validate(Validator::NotEmpty),
            )
            .attribute(
                AttributeSchema::new("cidr_block", AttributeType::String)
                    .force_new()
                    .validate(Validator::Cidr),
            )
            .attribute(
                AttributeSchema::new("ipv6_type", AttributeType::String)
                    .validate(Validator::StringInSlice(IPV6_TYPES))
                    .with_description("Adding it upgrades the subnet in place; removing it recreates the subnet"),
            )
            .attribute(AttributeSchema::new("ip_stack_type", AttributeType::String).computed())
            .attribute(AttributeSchema::new("ipv6_cidr_block", AttributeType::String).computed())
            .attribute(AttributeSchema::new("is_default", AttributeType::Bool).computed())
            .attribute(AttributeSchema::new("create_time", AttributeType::String).computed())
            .rule(Rule::AtLeastOneOf(&["cidr_block", "ipv6_type"]))
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let cidr_block = d.get_opt_str("cidr_block");
        let ipv6_type = d.get_opt_str("ipv6_type");
        let request = CreateSubnetRequest {
            region_id: d.get_string("region_id"),
            vpc_id: d.get_string("vpc_id"),
            name: d.get_string("name"),
            stack_type: stack_type(cidr_block.is_some(), ipv6_type.is_some()).to_string(),
            cidr_block,
            ipv6_type,
        };
        let response = meta.zec().send(ctx, &request).await?;
        if response.subnet_id.is_empty() {
            return Err(CloudError::contract("CreateSubnet returned no subnetId"));
        }
        d.set_id(&response.subnet_id);
        tracing::info!(subnet_id = %response.subnet_id, stack_type = %request.stack_type, "created subnet");

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        match meta.zec().describe_subnet_by_id(ctx, d.id()).await? {
            Some(subnet) => set_subnet(d, &subnet),
            None => forget(d, "subnet"),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let subnet_id = d.id().to_string();

        if d.has_change("name") {
            let request = ModifySubnetAttributeRequest {
                subnet_id: subnet_id.clone(),
                name: Some(d.get_string("name")),
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(&["name"]);
        }

        // Removal and stack switches are replacements, so a change here is
        // always an IPv4 subnet gaining IPv6
        if d.has_change("ipv6_type") {
            let request = ModifySubnetStackTypeRequest {
                subnet_id: subnet_id.clone(),
                stack_type: stack_type(true, true).to_string(),
                ipv6_type: d.get_opt_str("ipv6_type"),
            };
            tracing::info!(subnet_id = %subnet_id, "adding IPv6 to subnet");
            meta.zec().send(ctx, &request).await?;
            d.commit(&["ipv6_type"]);
        }

        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = DeleteSubnetRequest {
            subnet_id: d.id().to_string(),
        };
        meta.zec().send_unless_gone(ctx, &request).await?;
        Ok(())
    }

    fn customize_diff(&self, d: &ResourceData) -> Result<Vec<&'static str>> {
        let (old_cidr, new_cidr) = d.get_change("cidr_block");
        let (old_v6, new_v6) = d.get_change("ipv6_type");

        if non_empty(&old_v6) && old_v6 != new_v6 {
            return Ok(vec!["ipv6_type"]);
        }
        let old_stack = stack_type(non_empty(&old_cidr), non_empty(&old_v6));
        let new_stack = stack_type(non_empty(&new_cidr), non_empty(&new_v6));
        match (old_stack, new_stack) {
            ("IPv4", "IPv6") | ("IPv6", "IPv4") | ("IPv4_IPv6", "IPv6") => Ok(vec!["ipv6_type", "cidr_block"]),
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> zenlayer_cloud::Attributes {
        value.as_object().cloned().unwrap_or_default()
    }

    fn diff(prior: Value, proposed: Value) -> Vec<&'static str> {
        let d = ResourceData::for_update("subnet-1", attrs(prior), attrs(proposed));
        SubnetResource.customize_diff(&d).unwrap()
    }

    #[test]
    fn test_adding_ipv6_is_in_place() {
        let replace = diff(
            json!({"cidr_block": "10.0.1.0/24", "ipv6_type": ""}),
            json!({"cidr_block": "10.0.1.0/24", "ipv6_type": "Public"}),
        );
        assert!(replace.is_empty());
    }

    #[test]
    fn test_removing_ipv6_forces_new() {
        let replace = diff(
            json!({"cidr_block": "10.0.1.0/24", "ipv6_type": "Public"}),
            json!({"cidr_block": "10.0.1.0/24", "ipv6_type": null}),
        );
        assert_eq!(replace, vec!["ipv6_type"]);
    }

    #[test]
    fn test_switching_stack_forces_new() {
        let replace = diff(
            json!({"cidr_block": "", "ipv6_type": "Public"}),
            json!({"cidr_block": "10.0.1.0/24", "ipv6_type": null}),
        );
        assert!(replace.contains(&"ipv6_type"));
    }

    #[test]
    fn test_stack_type() {
        assert_eq!(stack_type(true, false), "IPv4");
        assert_eq!(stack_type(false, true), "IPv6");
        assert_eq!(stack_type(true, true), "IPv4_IPv6");
    }

    #[test]
    fn test_needs_an_address_family() {
        let schema = SubnetResource.schema();
        let config = attrs(json!({"vpc_id": "vpc-1", "region_id": "asia-east-1", "name": "s"}));
        assert!(schema.validate(&config).is_err());
    }
}
