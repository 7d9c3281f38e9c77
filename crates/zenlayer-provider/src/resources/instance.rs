//! `zenlayercloud_zec_instance`
//!
//! Image, key, time-zone and agent changes are applied with a reset, which
//! needs a stopped instance: the handler shuts it down, resets it and then
//! brings it to the power state requested by `running_flag`.

use super::{
    force_delete, forget, forget_in_state, kind, resource_group_id, resource_group_name, update_resource_group,
    wait_recycled, wait_released,
};
use crate::client::ZenlayerClient;
use async_trait::async_trait;
use zenlayer_cloud::{
    AttributeSchema, AttributeType, CloudError, OpContext, Resource, ResourceData, ResourceSchema, Result, Rule,
    StateChangeConf, Validator, wait_settled,
};
use zenlayer_sdk::zec::{
    AssignSecurityGroupRequest, CreateZecInstancesRequest, DeleteInstanceRequest, InstanceInfo,
    ModifyInstanceTypeRequest, ModifyInstancesAttributeRequest, ResetInstanceRequest, ResetInstancesPasswordRequest,
    ResizeDiskRequest, StartInstancesRequest, StopInstancesRequest, SystemDisk,
};

const INSTANCE_PENDING: &[&str] = &[
    "PENDING",
    "DEPLOYING",
    "REBUILDING",
    "BOOTING",
    "STOPPING",
    "RELEASING",
    "RECYCLING",
    "RESIZING",
];
const INSTANCE_TARGET: &[&str] = &["RUNNING", "STOPPED"];
const INSTANCE_FAILED: &[&str] = &["CREATE_FAILED"];
const INSTANCE_GONE: &[&str] = &["CREATE_FAILED", "RECYCLE"];

const MIN_SYSTEM_DISK_SIZE: i64 = 20;

/// Attributes applied through `ResetInstance`
const RESET_FIELDS: &[&str] = &["image_id", "key_id", "time_zone", "enable_agent"];

pub struct InstanceResource;

fn set_instance(d: &mut ResourceData, instance: &InstanceInfo) {
    d.set("instance_name", instance.instance_name.as_str());
    d.set("zone_id", instance.zone_id.as_str());
    d.set("instance_type", instance.instance_type.as_str());
    d.set("image_id", instance.image_id.as_str());
    d.set("image_name", instance.image_name.as_str());
    d.set("key_id", instance.key_id.as_str());
    d.set("time_zone", instance.time_zone.as_str());
    d.set("enable_agent", instance.enable_agent);
    d.set("subnet_id", instance.subnet_id.as_str());
    d.set("vpc_id", instance.vpc_id.as_str());
    d.set("nic_id", instance.nic_id.as_str());
    d.set("security_group_id", instance.security_group_id.as_str());
    d.set("system_disk_id", instance.system_disk.disk_id.as_str());
    d.set("system_disk_size", instance.system_disk.disk_size);
    d.set("system_disk_category", instance.system_disk.disk_category.as_str());
    let private_ip = instance.private_ip_addresses.first().cloned().unwrap_or_default();
    d.set("lan_ip", private_ip.as_str());
    d.set("private_ip_address", private_ip);
    d.set(
        "public_ip_address",
        instance.public_ip_addresses.first().cloned().unwrap_or_default(),
    );
    d.set("cpu", instance.cpu);
    d.set("memory", instance.memory);
    d.set("instance_status", instance.status.as_str());
    d.set("running_flag", instance.status == "RUNNING");
    d.set("resource_group_id", instance.resource_group_id.as_str());
    d.set("resource_group_name", instance.resource_group_name.as_str());
    d.set("create_time", instance.create_time.as_str());
}

/// Poll until the instance reaches one of `target`
async fn wait_instance(
    ctx: &OpContext,
    meta: &ZenlayerClient,
    instance_id: &str,
    pending: &'static [&'static str],
    target: &'static [&'static str],
) -> Result<InstanceInfo> {
    let zec = meta.zec();
    StateChangeConf::new(
        format!("instance {instance_id}"),
        pending,
        target,
        zec.instance_state_refresh(ctx, instance_id, INSTANCE_FAILED),
        ctx.loop_timeout(),
    )
    .wait(ctx)
    .await?
    .ok_or_else(|| CloudError::NotFound(format!("instance {instance_id}")))
}

async fn stop_instance(ctx: &OpContext, meta: &ZenlayerClient, instance_id: &str) -> Result<InstanceInfo> {
    tracing::info!(instance_id, "stopping instance");
    let request = StopInstancesRequest {
        instance_ids: vec![instance_id.to_string()],
    };
    meta.zec().send(ctx, &request).await?;
    wait_instance(ctx, meta, instance_id, &["RUNNING", "STOPPING"], &["STOPPED"]).await
}

async fn start_instance(ctx: &OpContext, meta: &ZenlayerClient, instance_id: &str) -> Result<InstanceInfo> {
    tracing::info!(instance_id, "starting instance");
    let request = StartInstancesRequest {
        instance_ids: vec![instance_id.to_string()],
    };
    meta.zec().send(ctx, &request).await?;
    wait_instance(ctx, meta, instance_id, &["STOPPED", "BOOTING"], &["RUNNING"]).await
}

/// Current status, settled out of any transient state
async fn settled_instance(ctx: &OpContext, meta: &ZenlayerClient, instance_id: &str) -> Result<InstanceInfo> {
    let refresh = meta.zec().instance_state_refresh(ctx, instance_id, INSTANCE_FAILED);
    wait_settled(ctx, &format!("instance {instance_id}"), INSTANCE_PENDING, refresh)
        .await?
        .ok_or_else(|| CloudError::NotFound(format!("instance {instance_id}")))
}

#[async_trait]
impl Resource<ZenlayerClient> for InstanceResource {
    fn type_name(&self) -> &'static str {
        "zec_instance"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(kind(self.type_name()))
            .with_description("ZEC virtual machine")
            .attribute(AttributeSchema::new("zone_id", AttributeType::String).required().force_new())
            .attribute(AttributeSchema::new("instance_type", AttributeType::String).required())
            .attribute(AttributeSchema::new("image_id", AttributeType::String).required())
            .attribute(
                AttributeSchema::new("instance_name", AttributeType::String)
                    .required()
                    .validate(Validator::NotEmpty),
            )
            .attribute(AttributeSchema::new("password", AttributeType::String).sensitive())
            .attribute(AttributeSchema::new("key_id", AttributeType::String).optional_computed())
            .attribute(AttributeSchema::new("subnet_id", AttributeType::String).required().force_new())
            .attribute(
                AttributeSchema::new("lan_ip", AttributeType::String)
                    .optional_computed()
                    .force_new()
                    .validate(Validator::Ip),
            )
            .attribute(
                AttributeSchema::new("system_disk_size", AttributeType::Int)
                    .default_value(MIN_SYSTEM_DISK_SIZE)
                    .validate(Validator::IntAtLeast(MIN_SYSTEM_DISK_SIZE)),
            )
            .attribute(
                AttributeSchema::new("system_disk_category", AttributeType::String)
                    .optional_computed()
                    .force_new(),
            )
            .attribute(AttributeSchema::new("time_zone", AttributeType::String).optional_computed())
            .attribute(AttributeSchema::new("enable_agent", AttributeType::Bool).optional_computed())
            .attribute(
                AttributeSchema::new("running_flag", AttributeType::Bool)
                    .default_value(true)
                    .with_description("Keep the instance running (true) or stopped (false)"),
            )
            .attribute(AttributeSchema::new("security_group_id", AttributeType::String).optional_computed())
            .attribute(resource_group_id())
            .attribute(resource_group_name())
            .attribute(force_delete())
            .attribute(AttributeSchema::new("instance_status", AttributeType::String).computed())
            .attribute(AttributeSchema::new("system_disk_id", AttributeType::String).computed())
            .attribute(AttributeSchema::new("nic_id", AttributeType::String).computed())
            .attribute(AttributeSchema::new("vpc_id", AttributeType::String).computed())
            .attribute(AttributeSchema::new("private_ip_address", AttributeType::String).computed())
            .attribute(AttributeSchema::new("public_ip_address", AttributeType::String).computed())
            .attribute(AttributeSchema::new("image_name", AttributeType::String).computed())
            .attribute(AttributeSchema::new("cpu", AttributeType::Int).computed())
            .attribute(AttributeSchema::new("memory", AttributeType::Int).computed())
            .attribute(AttributeSchema::new("create_time", AttributeType::String).computed())
            .rule(Rule::ConflictsWith("password", "key_id"))
    }

    async fn create(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let request = CreateZecInstancesRequest {
            zone_id: d.get_string("zone_id"),
            instance_type: d.get_string("instance_type"),
            image_id: d.get_string("image_id"),
            instance_name: d.get_string("instance_name"),
            password: d.get_opt_str("password"),
            key_id: d.get_opt_str("key_id"),
            subnet_id: d.get_string("subnet_id"),
            lan_ip: d.get_opt_str("lan_ip"),
            system_disk: SystemDisk {
                disk_size: d.get_i64("system_disk_size"),
                disk_category: d.get_string("system_disk_category"),
                ..Default::default()
            },
            time_zone: d.get_opt_str("time_zone"),
            enable_agent: d.get_opt_bool("enable_agent"),
            security_group_id: d.get_opt_str("security_group_id"),
            resource_group_id: d.get_opt_str("resource_group_id"),
            instance_count: 1,
        };
        let response = meta.zec().send(ctx, &request).await?;
        let Some(instance_id) = response.instance_ids.into_iter().next() else {
            return Err(CloudError::contract("CreateZecInstances returned no instanceIds"));
        };
        d.set_id(&instance_id);
        tracing::info!(instance_id = %instance_id, "creating instance");

        let instance = wait_instance(ctx, meta, &instance_id, INSTANCE_PENDING, INSTANCE_TARGET).await?;
        if !d.get_bool("running_flag") && instance.status == "RUNNING" {
            stop_instance(ctx, meta, &instance_id).await?;
        }

        self.read(ctx, meta, d).await
    }

    async fn read(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        let refresh = meta.zec().instance_state_refresh(ctx, &instance_id, &[]);
        match wait_settled(ctx, &format!("instance {instance_id}"), INSTANCE_PENDING, refresh).await? {
            None => forget(d, "instance"),
            Some(instance) if INSTANCE_GONE.contains(&instance.status.as_str()) => {
                forget_in_state(d, "instance", &instance.status)
            }
            Some(instance) => set_instance(d, &instance),
        }
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        let ids = vec![instance_id.clone()];

        if d.has_change("instance_name") {
            let request = ModifyInstancesAttributeRequest {
                instance_ids: ids.clone(),
                instance_name: d.get_string("instance_name"),
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(&["instance_name"]);
        }

        if d.has_change("instance_type") {
            let request = ModifyInstanceTypeRequest {
                instance_id: instance_id.clone(),
                instance_type: d.get_string("instance_type"),
            };
            tracing::info!(instance_id = %instance_id, "changing instance type");
            meta.zec().send(ctx, &request).await?;
            wait_instance(ctx, meta, &instance_id, INSTANCE_PENDING, INSTANCE_TARGET).await?;
            d.commit(&["instance_type"]);
        }

        let reset = d.has_changes(RESET_FIELDS);
        let password_only = !reset && d.has_change("password");
        if reset || password_only {
            let current = settled_instance(ctx, meta, &instance_id).await?;
            if current.status != "STOPPED" {
                stop_instance(ctx, meta, &instance_id).await?;
            }

            if reset {
                let request = ResetInstanceRequest {
                    instance_id: instance_id.clone(),
                    image_id: d.get_string("image_id"),
                    password: d.get_opt_str("password"),
                    key_id: d.get_opt_str("key_id"),
                    time_zone: d.get_opt_str("time_zone"),
                    enable_agent: d.get_opt_bool("enable_agent"),
                };
                tracing::info!(instance_id = %instance_id, image_id = %request.image_id, "resetting instance");
                meta.zec().send(ctx, &request).await?;
                wait_instance(ctx, meta, &instance_id, INSTANCE_PENDING, INSTANCE_TARGET).await?;
                d.commit(RESET_FIELDS);
            } else {
                let request = ResetInstancesPasswordRequest {
                    instance_ids: ids.clone(),
                    password: d.get_string("password"),
                };
                meta.zec().send(ctx, &request).await?;
            }
            d.commit(&["password"]);
        }

        if d.has_change("system_disk_size") {
            let (old, new) = d.get_change("system_disk_size");
            let (old, new) = (old.as_i64().unwrap_or_default(), new.as_i64().unwrap_or_default());
            if new < old {
                return Err(CloudError::validation(format!(
                    "system_disk_size cannot shrink from {old} to {new} GB"
                )));
            }
            let request = ResizeDiskRequest {
                disk_id: d.get_string("system_disk_id"),
                disk_size: new,
            };
            meta.zec().send(ctx, &request).await?;
            d.commit(&["system_disk_size"]);
        }

        if d.has_change("security_group_id") {
            if let Some(security_group_id) = d.get_opt_str("security_group_id") {
                let request = AssignSecurityGroupRequest {
                    security_group_id,
                    nic_ids: vec![d.get_string("nic_id")],
                };
                meta.zec().send(ctx, &request).await?;
            }
            d.commit(&["security_group_id"]);
        }

        update_resource_group(ctx, meta, d).await?;

        // Power state last, so a reset above ends in the requested state
        let current = settled_instance(ctx, meta, &instance_id).await?;
        let want_running = d.get_bool("running_flag");
        match (want_running, current.status.as_str()) {
            (true, "STOPPED") => {
                start_instance(ctx, meta, &instance_id).await?;
            }
            (false, "RUNNING") => {
                stop_instance(ctx, meta, &instance_id).await?;
            }
            _ => {}
        }
        d.commit(&["running_flag"]);

        self.read(ctx, meta, d).await
    }

    async fn delete(&self, ctx: &OpContext, meta: &ZenlayerClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        let request = DeleteInstanceRequest {
            instance_id: instance_id.clone(),
        };
        if !meta.zec().send_unless_gone(ctx, &request).await? {
            return Ok(());
        }

        let zec = meta.zec();
        wait_recycled(
            ctx,
            format!("instance {instance_id}"),
            &["RUNNING", "STOPPED", "STOPPING", "RELEASING", "RECYCLING"],
            zec.instance_state_refresh(ctx, &instance_id, INSTANCE_FAILED),
        )
        .await?;

        if d.get_bool("force_delete") {
            tracing::info!(instance_id = %instance_id, "releasing instance from the recycle bin");
            if zec.send_unless_gone(ctx, &request).await? {
                wait_released(
                    ctx,
                    format!("instance {instance_id}"),
                    zec.instance_state_refresh(ctx, &instance_id, &[]),
                )
                .await?;
            }
        }
        Ok(())
    }

    fn customize_diff(&self, d: &ResourceData) -> Result<Vec<&'static str>> {
        let (old, new) = d.get_change("system_disk_size");
        if let (Some(old), Some(new)) = (old.as_i64(), new.as_i64()) {
            if new < old {
                return Err(CloudError::validation(format!(
                    "system_disk_size cannot shrink from {old} to {new} GB"
                )));
            }
        }
        Ok(Vec::new())
    }
}
