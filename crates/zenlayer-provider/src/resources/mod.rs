//! Resource lifecycle handlers
//!
//! One handler per resource kind. Handlers share the helpers below for the
//! cross-cutting parts of the lifecycle: resource-group reassignment,
//! forgetting objects that vanished remotely, and attribute projection.

mod auto_snapshot_policy;
mod auto_snapshot_policy_attachment;
mod border_gateway;
mod cidr;
mod disk;
mod disk_attachment;
mod eip;
mod eip_association;
mod instance;
mod nat_gateway;
mod nat_gateway_dnat;
mod nat_gateway_snat;
mod security_group;
mod security_group_rule_set;
mod snapshot;
mod subnet;
mod vnic;
mod vnic_attachment;
mod vnic_ipv4;
mod vpc;
mod vpc_route;
mod vpc_security_group_attachment;

pub use auto_snapshot_policy::AutoSnapshotPolicyResource;
pub use auto_snapshot_policy_attachment::AutoSnapshotPolicyAttachmentResource;
pub use border_gateway::BorderGatewayResource;
pub use cidr::CidrResource;
pub use disk::DiskResource;
pub use disk_attachment::DiskAttachmentResource;
pub use eip::EipResource;
pub use eip_association::EipAssociationResource;
pub use instance::InstanceResource;
pub use nat_gateway::NatGatewayResource;
pub use nat_gateway_dnat::NatGatewayDnatResource;
pub use nat_gateway_snat::NatGatewaySnatResource;
pub use security_group::SecurityGroupResource;
pub use security_group_rule_set::SecurityGroupRuleSetResource;
pub use snapshot::SnapshotResource;
pub use subnet::SubnetResource;
pub use vnic::VnicResource;
pub use vnic_attachment::VnicAttachmentResource;
pub use vnic_ipv4::VnicIpv4Resource;
pub use vpc::VpcResource;
pub use vpc_route::VpcRouteResource;
pub use vpc_security_group_attachment::VpcSecurityGroupAttachmentResource;

use crate::client::ZenlayerClient;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, OpContext, ResourceData, Result, StateChangeConf, StateRefreshFunc,
};

/// Provider prefix of every registered kind
pub const PREFIX: &str = "zenlayercloud";

pub(crate) fn kind(type_name: &str) -> String {
    format!("{PREFIX}_{type_name}")
}

/// Move the resource to its new resource group when that changed
pub(crate) async fn update_resource_group(
    ctx: &OpContext,
    meta: &ZenlayerClient,
    d: &mut ResourceData,
) -> Result<()> {
    if !d.has_change("resource_group_id") {
        return Ok(());
    }
    if let Some(group) = d.get_opt_str("resource_group_id") {
        let id = d.id().to_string();
        meta.user().add_resource_resource_group(ctx, &group, &[&id]).await?;
    }
    d.commit(&["resource_group_id"]);
    Ok(())
}

/// Statuses of an object sitting in the recycle bin
pub(crate) const RECYCLED: &[&str] = &["RECYCLED", "RECYCLE"];

const RELEASING: &[&str] = &["RECYCLED", "RECYCLE", "DELETING", "RELEASING"];

/// Wait for a deleted object to reach the recycle bin or vanish
pub(crate) async fn wait_recycled<T>(
    ctx: &OpContext,
    label: String,
    pending: &'static [&'static str],
    refresh: StateRefreshFunc<'_, T>,
) -> Result<()> {
    StateChangeConf::new(label, pending, RECYCLED, refresh, ctx.loop_timeout())
        .accept_gone()
        .wait(ctx)
        .await?;
    Ok(())
}

/// Wait for an object released from the recycle bin to disappear
pub(crate) async fn wait_released<T>(ctx: &OpContext, label: String, refresh: StateRefreshFunc<'_, T>) -> Result<()> {
    StateChangeConf::new(label, RELEASING, &[], refresh, ctx.loop_timeout())
        .wait(ctx)
        .await?;
    Ok(())
}

/// Forget an object that no longer exists; the host plans a recreate
pub(crate) fn forget(d: &mut ResourceData, what: &str) {
    let id = d.id().to_string();
    d.warn(
        format!("{what} {id} not found, removing it from state"),
        "the object was deleted outside of this provider",
    );
    d.clear_id();
}

/// Same as [`forget`] for objects left in a terminal state
pub(crate) fn forget_in_state(d: &mut ResourceData, what: &str, state: &str) {
    let id = d.id().to_string();
    d.warn(
        format!("{what} {id} is {state}, removing it from state"),
        "the object can no longer be managed and will be recreated",
    );
    d.clear_id();
}

pub(crate) fn resource_group_id() -> AttributeSchema {
    AttributeSchema::new("resource_group_id", AttributeType::String)
        .optional_computed()
        .with_description("Resource group the object belongs to")
}

pub(crate) fn resource_group_name() -> AttributeSchema {
    AttributeSchema::new("resource_group_name", AttributeType::String).computed()
}

pub(crate) fn force_delete() -> AttributeSchema {
    AttributeSchema::new("force_delete", AttributeType::Bool)
        .default_value(false)
        .with_description("Release the object from the recycle bin after deletion")
}
