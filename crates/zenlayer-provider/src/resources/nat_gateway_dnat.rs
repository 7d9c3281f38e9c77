//! `zenlayercloud_zec_nat_gateway_dnat`: id `<nat>:<dnat>`

use super::{forget, kind};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    Attributes, AttributeSchema, AttributeType, CloudError, CompositeId, OpContext, Resource, ResourceData, ResourceSchema,
    Result, Rule, Validator, parse_pair,
};
use zenlayer_sdk::zec::{CreateDnatEntryRequest, DeleteDnatEntryRequest, DnatEntry, ModifyDnatEntryRequest};

const PROTOCOL_ANY: &str = "Any";
const MODIFIABLE: &[&str] = &["eip_id", "protocol", "private_ip", "listener_port", "internal_port"];

pub struct NatGatewayDnatResource;

/// Ports are required for TCP/UDP and must be omitted for `Any`
fn check_ports(config: &Attributes) -> std::result::Result<(), String> {
    let has = |key: &str| config.get(key).and_then(|v| v.as_str()).is_some_and(|s| !s.is_empty());
    let protocol = config.get("protocol").and_then(|v| v.as_str()).unwrap_or_default();
    let ports = [has("listener_port"), has("internal_port")];
    if protocol == PROTOCOL_ANY {
        if ports.contains(&true) {
            return Err("listener_port and internal_port must be omitted when protocol is Any".to_string());
        }
    } else if ports.contains(&false) {
        return Err(format!("listener_port and internal_port are required for protocol {protocol}"));
    }
    Ok(())
}

fn ports(d: &ResourceData) -> (Option<String>, Option<String>) {
    if d.get_str("protocol") == PROTOCOL_ANY {
        (None, None)
    } else {
        (d.get_opt_str("listener_port"), d.get_opt_str("internal_port"))
    }
}

fn set_dnat(d: &mut ResourceData, dnat: &DnatEntry) {
    d.set("nat_gateway_id", dnat.nat_gateway_id.as_str());
    d.set("eip_id", dnat.eip_id.as_str());
    d.set("protocol", dnat.protocol.as_str());
    d.set("private_ip", dnat.private_ip.as_str());
    d.set("listener_port", dnat.listener_port.as_str());
    d.set("internal_port", dnat.internal_port.as_str());
    d.set("dnat_entry_id", dnat.dnat_entry_id.as_str());
}

#[async_trait]
impl Resource<ZenlayerClient> for NatGatewayDnatResource {
    fn type_name(&self) -> &'static str {
        "zec_nat_gateway_dnat"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("Destination NAT (port forwarding) entry of a NAT gateway")
            .attribute(AttributeSchema::new("nat_gateway_id", AttributeType::String).required().force_new())
            .attribute(AttributeSchema::new("eip_id", AttributeType::String).required())
            .attribute(
                AttributeSchema::new("protocol", AttributeType::String)
                    .required()
                    .validate(Validator::StringInSlice(&["TCP", "UDP", PROTOCOL_ANY])),
            )
            .attribute(
                AttributeSchema::new("private_ip", AttributeType::String)
                    .required()
                    .validate(Validator::Ip),
            )
            .attribute(
                AttributeSchema::new("listener_port", AttributeType::String)
                    .validate(Validator::PortSpec)
                    .with_description("Public port, \"p\" or \"a-b\""),
            )
            .attribute(
                AttributeSchema::new("internal_port", AttributeType::String)
                    .validate(Validator::PortSpec)
                    .with_description("Private port, \"p\" or \"a-b\""),
            )
            .attribute(AttributeSchema::new("dnat_entry_id", AttributeType::String).computed())
            .rule(Rule::Custom(check_ports))
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let nat_gateway_id = d.get_string("nat_gateway_id");
        let (listener_port, internal_port) = ports(d);
        let request = CreateDnatEntryRequest {
            nat_gateway_id: nat_gateway_id.clone(),
            eip_id: d.get_string("eip_id"),
            protocol: d.get_string("protocol"),
            private_ip: d.get_string("private_ip"),
            listener_port,
            internal_port,
        };
        let response = meta.zec().send(ctx, &request).await?;
        if response.dnat_entry_id.is_empty() {
            return Err(CloudError::contract("CreateDnatEntry returned no dnatEntryId"));
        }
        d.set_id(CompositeId::new([nat_gateway_id.as_str(), response.dnat_entry_id.as_str()]).encode());
        tracing::info!(nat_gateway_id = %nat_gateway_id, dnat_entry_id = %response.dnat_entry_id, "DNAT entry created");

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (nat_gateway_id, dnat_entry_id) = parse_pair(d.id())?;
        match meta.zec().describe_dnat_entry(ctx, &nat_gateway_id, &dnat_entry_id).await? {
            Some(dnat) => set_dnat(d, &dnat),
            None => forget(d, "DNAT entry"),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        if d.has_changes(MODIFIABLE) {
            let (_, dnat_entry_id) = parse_pair(d.id())?;
            let (listener_port, internal_port) = ports(d);
            let request = ModifyDnatEntryRequest {
                dnat_entry_id,
                eip_id: d.get_string("eip_id"),
                protocol: d.get_string("protocol"),
                private_ip: d.get_string("private_ip"),
                listener_port,
                internal_port,
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(MODIFIABLE);
        }
        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let (_, dnat_entry_id) = parse_pair(d.id())?;
        meta.zec()
            .send_unless_gone(ctx, &DeleteDnatEntryRequest { dnat_entry_id })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn attrs(value: Value) -> Attributes {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_any_protocol_omits_ports() {
        let config = attrs(json!({"protocol": "Any", "listener_port": "80"}));
        assert!(check_ports(&config).is_err());
        assert!(check_ports(&attrs(json!({"protocol": "Any"}))).is_ok());
    }

    #[test]
    fn test_tcp_requires_both_ports() {
        assert!(check_ports(&attrs(json!({"protocol": "TCP", "listener_port": "80"}))).is_err());
        let config = attrs(json!({"protocol": "TCP", "listener_port": "8000-8080", "internal_port": "8000-8080"}));
        assert!(check_ports(&config).is_ok());
    }

    #[test]
    fn test_schema_rejects_bad_port_range() {
        let config = attrs(json!({
            "nat_gateway_id": "nat-1", "eip_id": "eip-1", "protocol": "UDP",
            "private_ip": "10.0.0.5", "listener_port": "70000", "internal_port": "53"
        }));
        assert!(NatGatewayDnatResource.schema().validate(&config).is_err());
    }
}
