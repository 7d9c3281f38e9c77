//! Handler traits and the provider registry
//!
//! Each resource kind implements [`Resource`], each query kind
//! [`DataSource`]. [`Provider`] registers them under stable names and plays
//! the host-facing entry points: it validates the configuration, builds the
//! per-operation context and turns errors into diagnostics.

use crate::context::{OpContext, Operation};
use crate::data::{Attributes, ResourceData};
use crate::error::Result;
use crate::response::{ApplyResponse, DataSourceResponse, Diagnostic, PlanResponse};
use crate::schema::ResourceSchema;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Lifecycle handler for one resource kind.
///
/// `M` is the provider meta object (the client factory).
#[async_trait]
pub trait Resource<M: Send + Sync>: Send + Sync {
    /// Kind name without the provider prefix, e.g. `zec_vpc`
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    async fn create(&self, ctx: &OpContext, meta: &M, d: &mut ResourceData) -> Result<()>;

    /// Hydrate `d` from the remote, or clear its id when the object is gone
    async fn read(&self, ctx: &OpContext, meta: &M, d: &mut ResourceData) -> Result<()>;

    async fn update(&self, ctx: &OpContext, meta: &M, d: &mut ResourceData) -> Result<()>;

    /// Must succeed when the object is already gone
    async fn delete(&self, ctx: &OpContext, meta: &M, d: &mut ResourceData) -> Result<()>;

    /// Adopt the given id; the registry reads afterwards
    async fn import(&self, _ctx: &OpContext, _meta: &M, _d: &mut ResourceData) -> Result<()> {
        Ok(())
    }

    /// Extra attributes that force replacement beyond the schema's
    /// `force_new` flags. An error rejects the planned change.
    fn customize_diff(&self, _d: &ResourceData) -> Result<Vec<&'static str>> {
        Ok(Vec::new())
    }
}

/// Read-only query kind
#[async_trait]
pub trait DataSource<M: Send + Sync>: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    /// Fill the computed list and set the result identifier
    async fn read(&self, ctx: &OpContext, meta: &M, d: &mut ResourceData) -> Result<()>;
}

/// Retry configuration for provider operations
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts allowed for errors of unknown cause
    pub max_attempts: u32,

    /// Initial delay between retries
    pub initial_delay: Duration,

    /// Maximum delay between retries
    pub max_delay: Duration,

    /// Backoff multiplier
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(attempt as i32);
        Duration::from_secs_f64(delay.min(self.max_delay.as_secs_f64()))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

struct RegisteredResource<M: Send + Sync> {
    handler: Box<dyn Resource<M>>,
    schema: ResourceSchema,
}

struct RegisteredDataSource<M: Send + Sync> {
    handler: Box<dyn DataSource<M>>,
    schema: ResourceSchema,
}

/// Registry of resource and data-source kinds
pub struct Provider<M: Send + Sync> {
    prefix: String,
    meta: M,
    retry: RetryConfig,
    resources: BTreeMap<String, RegisteredResource<M>>,
    data_sources: BTreeMap<String, RegisteredDataSource<M>>,
}

impl<M: Send + Sync + 'static> Provider<M> {
    /// Kinds are registered as `<prefix>_<type_name>`
    pub fn new(prefix: impl Into<String>, meta: M) -> Self {
        Self {
            prefix: prefix.into(),
            meta,
            retry: RetryConfig::default(),
            resources: BTreeMap::new(),
            data_sources: BTreeMap::new(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn resource(mut self, handler: impl Resource<M> + 'static) -> Self {
        let name = format!("{}_{}", self.prefix, handler.type_name());
        let schema = handler.schema();
        self.resources.insert(
            name,
            RegisteredResource {
                handler: Box::new(handler),
                schema,
            },
        );
        self
    }

    pub fn data_source(mut self, handler: impl DataSource<M> + 'static) -> Self {
        let name = format!("{}_{}", self.prefix, handler.type_name());
        let schema = handler.schema();
        self.data_sources.insert(
            name,
            RegisteredDataSource {
                handler: Box::new(handler),
                schema,
            },
        );
        self
    }

    pub fn meta(&self) -> &M {
        &self.meta
    }

    pub fn resource_types(&self) -> Vec<&str> {
        self.resources.keys().map(String::as_str).collect()
    }

    pub fn data_source_types(&self) -> Vec<&str> {
        self.data_sources.keys().map(String::as_str).collect()
    }

    pub fn resource_schema(&self, kind: &str) -> Option<&ResourceSchema> {
        self.resources.get(kind).map(|r| &r.schema)
    }

    pub fn data_source_schema(&self, kind: &str) -> Option<&ResourceSchema> {
        self.data_sources.get(kind).map(|r| &r.schema)
    }

    fn context(&self, operation: Operation, d: &ResourceData, cancel: CancellationToken) -> OpContext {
        OpContext::new(operation, d.timeout(operation), cancel).with_retry(self.retry.clone())
    }

    /// Validate a desired configuration for a resource or data source
    pub fn validate(&self, kind: &str, config: &Attributes) -> Vec<Diagnostic> {
        let schema = match self.resource_schema(kind).or_else(|| self.data_source_schema(kind)) {
            Some(schema) => schema,
            None => return vec![unknown_kind(kind)],
        };
        let mut config = config.clone();
        schema.apply_defaults(&mut config);
        match schema.validate(&config) {
            Ok(()) => Vec::new(),
            Err(e) => vec![Diagnostic::error(format!("invalid {kind} configuration"), e.to_string())],
        }
    }

    pub async fn create(&self, kind: &str, mut config: Attributes, cancel: CancellationToken) -> ApplyResponse {
        let Some(entry) = self.resources.get(kind) else {
            return failed(unknown_kind(kind));
        };
        entry.schema.apply_defaults(&mut config);
        if let Err(e) = entry.schema.validate(&config) {
            return failed(error_diagnostic(Operation::Create, kind, &e));
        }

        let mut d = ResourceData::new(config).with_timeouts(entry.schema.timeouts);
        let ctx = self.context(Operation::Create, &d, cancel);
        tracing::info!(kind, "creating");

        let result = entry.handler.create(&ctx, &self.meta, &mut d).await;
        let mut resp = ApplyResponse {
            state: None,
            diagnostics: d.take_diagnostics(),
        };
        if !d.id().is_empty() {
            resp.state = Some(d.state());
        }
        if let Err(e) = result {
            resp.diagnostics.push(error_diagnostic(Operation::Create, kind, &e));
        }
        resp
    }

    pub async fn read(&self, kind: &str, id: &str, prior: Attributes, cancel: CancellationToken) -> ApplyResponse {
        let Some(entry) = self.resources.get(kind) else {
            return failed(unknown_kind(kind));
        };
        let mut d = ResourceData::from_state(id, prior).with_timeouts(entry.schema.timeouts);
        let ctx = self.context(Operation::Read, &d, cancel);

        let result = entry.handler.read(&ctx, &self.meta, &mut d).await;
        finish(Operation::Read, kind, d, result)
    }

    pub async fn update(
        &self,
        kind: &str,
        id: &str,
        prior: Attributes,
        mut config: Attributes,
        cancel: CancellationToken,
    ) -> ApplyResponse {
        let Some(entry) = self.resources.get(kind) else {
            return failed(unknown_kind(kind));
        };
        entry.schema.apply_defaults(&mut config);
        entry.schema.null_absent(&mut config);
        if let Err(e) = entry.schema.validate(&config) {
            return failed(error_diagnostic(Operation::Update, kind, &e));
        }

        let mut d = ResourceData::for_update(id, prior, config).with_timeouts(entry.schema.timeouts);
        let ctx = self.context(Operation::Update, &d, cancel);
        tracing::info!(kind, id, "updating");

        let result = entry.handler.update(&ctx, &self.meta, &mut d).await;
        if result.is_err() {
            d.rollback_uncommitted();
        }
        finish(Operation::Update, kind, d, result)
    }

    pub async fn delete(&self, kind: &str, id: &str, prior: Attributes, cancel: CancellationToken) -> ApplyResponse {
        let Some(entry) = self.resources.get(kind) else {
            return failed(unknown_kind(kind));
        };
        let mut d = ResourceData::from_state(id, prior).with_timeouts(entry.schema.timeouts);
        let ctx = self.context(Operation::Delete, &d, cancel);
        tracing::info!(kind, id, "deleting");

        match entry.handler.delete(&ctx, &self.meta, &mut d).await {
            Ok(()) => ApplyResponse {
                state: None,
                diagnostics: d.take_diagnostics(),
            },
            Err(e) => {
                let mut resp = ApplyResponse {
                    state: Some(d.state()),
                    diagnostics: d.take_diagnostics(),
                };
                resp.diagnostics.push(error_diagnostic(Operation::Delete, kind, &e));
                resp
            }
        }
    }

    /// Adopt an existing remote object and read it
    pub async fn import(&self, kind: &str, id: &str, cancel: CancellationToken) -> ApplyResponse {
        let Some(entry) = self.resources.get(kind) else {
            return failed(unknown_kind(kind));
        };
        let mut d = ResourceData::from_state(id, Attributes::new()).with_timeouts(entry.schema.timeouts);
        let ctx = self.context(Operation::Import, &d, cancel);

        if let Err(e) = entry.handler.import(&ctx, &self.meta, &mut d).await {
            return failed(error_diagnostic(Operation::Import, kind, &e));
        }
        let result = entry.handler.read(&ctx, &self.meta, &mut d).await;
        let mut resp = finish(Operation::Import, kind, d, result);
        if resp.is_success() && resp.state.is_none() {
            resp.add_error(
                format!("cannot import {kind}"),
                format!("remote object {id} does not exist"),
            );
        }
        resp
    }

    /// Attributes whose change from `prior` to `proposed` forces replacement
    pub fn plan(&self, kind: &str, prior: Option<(&str, &Attributes)>, proposed: &Attributes) -> PlanResponse {
        let Some(entry) = self.resources.get(kind) else {
            return PlanResponse {
                requires_replace: Vec::new(),
                diagnostics: vec![unknown_kind(kind)],
            };
        };
        let mut proposed = proposed.clone();
        entry.schema.apply_defaults(&mut proposed);
        entry.schema.null_absent(&mut proposed);

        let mut resp = PlanResponse::default();
        if let Err(e) = entry.schema.validate(&proposed) {
            resp.diagnostics.push(error_diagnostic(Operation::Plan, kind, &e));
            return resp;
        }
        let Some((id, prior)) = prior else {
            return resp;
        };

        let d = ResourceData::for_update(id, prior.clone(), proposed);
        for attr in entry.schema.force_new_attributes() {
            if prior.contains_key(attr.name) && d.has_change(attr.name) {
                resp.requires_replace.push(attr.name.to_string());
            }
        }
        match entry.handler.customize_diff(&d) {
            Ok(extra) => {
                for name in extra {
                    if !resp.requires_replace.iter().any(|n| n == name) {
                        resp.requires_replace.push(name.to_string());
                    }
                }
            }
            Err(e) => resp.diagnostics.push(error_diagnostic(Operation::Plan, kind, &e)),
        }
        resp
    }

    pub async fn read_data_source(
        &self,
        kind: &str,
        mut config: Attributes,
        cancel: CancellationToken,
    ) -> DataSourceResponse {
        let Some(entry) = self.data_sources.get(kind) else {
            return DataSourceResponse {
                diagnostics: vec![unknown_kind(kind)],
                ..Default::default()
            };
        };
        entry.schema.apply_defaults(&mut config);
        if let Err(e) = entry.schema.validate(&config) {
            return DataSourceResponse {
                diagnostics: vec![error_diagnostic(Operation::ReadDataSource, kind, &e)],
                ..Default::default()
            };
        }

        let mut d = ResourceData::new(config).with_timeouts(entry.schema.timeouts);
        let ctx = self.context(Operation::ReadDataSource, &d, cancel);
        let result = entry.handler.read(&ctx, &self.meta, &mut d).await;

        let mut resp = DataSourceResponse {
            id: d.id().to_string(),
            state: d.state(),
            diagnostics: d.take_diagnostics(),
        };
        if let Err(e) = result {
            resp.diagnostics.push(error_diagnostic(Operation::ReadDataSource, kind, &e));
        }
        resp
    }
}

fn unknown_kind(kind: &str) -> Diagnostic {
    Diagnostic::error(format!("unknown kind {kind}"), "the kind is not registered with this provider")
}

fn error_diagnostic(operation: Operation, kind: &str, err: &crate::error::CloudError) -> Diagnostic {
    tracing::error!(%operation, kind, "{}", err);
    Diagnostic::error(format!("{operation} {kind} failed"), err.to_string())
}

fn failed(diagnostic: Diagnostic) -> ApplyResponse {
    ApplyResponse {
        state: None,
        diagnostics: vec![diagnostic],
    }
}

/// Read-style completion: an empty id means the object is gone
fn finish(operation: Operation, kind: &str, mut d: ResourceData, result: Result<()>) -> ApplyResponse {
    let mut resp = ApplyResponse {
        state: None,
        diagnostics: d.take_diagnostics(),
    };
    if !d.id().is_empty() {
        resp.state = Some(d.state());
    }
    if let Err(e) = result {
        resp.diagnostics.push(error_diagnostic(operation, kind, &e));
    }
    resp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CloudError;
    use crate::schema::{AttributeSchema, AttributeType, Rule, Validator};
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// In-memory remote: id -> size
    #[derive(Default)]
    struct Store {
        disks: Mutex<BTreeMap<String, i64>>,
    }

    struct Disk;

    #[async_trait]
    impl Resource<Store> for Disk {
        fn type_name(&self) -> &'static str {
            "disk"
        }

        fn schema(&self) -> ResourceSchema {
            ResourceSchema::new("test_disk")
                .attribute(AttributeSchema::new("zone_id", AttributeType::String).required().force_new())
                .attribute(
                    AttributeSchema::new("disk_size", AttributeType::Int)
                        .default_value(20)
                        .validate(Validator::IntAtLeast(20)),
                )
                .attribute(AttributeSchema::new("name", AttributeType::String))
                .attribute(AttributeSchema::new("status", AttributeType::String).computed())
                .rule(Rule::AtLeastOneOf(&["zone_id"]))
        }

        async fn create(&self, _ctx: &OpContext, meta: &Store, d: &mut ResourceData) -> Result<()> {
            let mut disks = meta.disks.lock().unwrap();
            let id = format!("disk-{}", disks.len() + 1);
            disks.insert(id.clone(), d.get_i64("disk_size"));
            d.set_id(id);
            Ok(())
        }

        async fn read(&self, _ctx: &OpContext, meta: &Store, d: &mut ResourceData) -> Result<()> {
            match meta.disks.lock().unwrap().get(d.id()) {
                Some(size) => {
                    d.set("disk_size", *size);
                    d.set("status", "AVAILABLE");
                }
                None => {
                    d.warn("disk is gone", d.id().to_string());
                    d.clear_id();
                }
            }
            Ok(())
        }

        async fn update(&self, _ctx: &OpContext, _meta: &Store, d: &mut ResourceData) -> Result<()> {
            if d.has_change("name") {
                d.commit(&["name"]);
            }
            Err(CloudError::Unsupported("resize".into()))
        }

        async fn delete(&self, _ctx: &OpContext, meta: &Store, d: &mut ResourceData) -> Result<()> {
            meta.disks.lock().unwrap().remove(d.id());
            Ok(())
        }

        fn customize_diff(&self, d: &ResourceData) -> Result<Vec<&'static str>> {
            let (old, new) = d.get_change("disk_size");
            if new.as_i64() < old.as_i64() {
                return Err(CloudError::validation("disk_size cannot shrink"));
            }
            Ok(Vec::new())
        }
    }

    fn attrs(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn provider() -> Provider<Store> {
        Provider::new("zenlayercloud", Store::default()).resource(Disk)
    }

    #[tokio::test]
    async fn test_create_applies_defaults_and_validates() {
        let p = provider();
        assert_eq!(p.resource_types(), vec!["zenlayercloud_disk"]);

        let resp = p
            .create("zenlayercloud_disk", attrs(json!({"zone_id": "z1"})), CancellationToken::new())
            .await;
        assert!(resp.is_success());
        assert_eq!(resp.id(), Some("disk-1"));
        assert_eq!(resp.state.unwrap()["disk_size"], json!(20));

        let resp = p
            .create("zenlayercloud_disk", attrs(json!({"disk_size": 10})), CancellationToken::new())
            .await;
        assert!(!resp.is_success());
        assert!(p.meta().disks.lock().unwrap().len() == 1);
    }

    #[tokio::test]
    async fn test_read_of_missing_object_clears_state() {
        let p = provider();
        let resp = p
            .read("zenlayercloud_disk", "disk-9", Attributes::new(), CancellationToken::new())
            .await;
        assert!(resp.is_success());
        assert!(resp.state.is_none());
        assert_eq!(resp.diagnostics.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_update_rolls_back_uncommitted() {
        let p = provider();
        let prior = attrs(json!({"zone_id": "z1", "disk_size": 20, "name": "a"}));
        let resp = p
            .update(
                "zenlayercloud_disk",
                "disk-1",
                prior,
                attrs(json!({"zone_id": "z1", "disk_size": 40, "name": "b"})),
                CancellationToken::new(),
            )
            .await;

        assert!(!resp.is_success());
        let state = resp.state.unwrap();
        assert_eq!(state["name"], json!("b"));
        assert_eq!(state["disk_size"], json!(20));
    }

    #[tokio::test]
    async fn test_import_of_missing_object_fails() {
        let p = provider();
        let resp = p.import("zenlayercloud_disk", "disk-404", CancellationToken::new()).await;
        assert!(!resp.is_success());
    }

    #[test]
    fn test_plan() {
        let p = provider();
        let prior = attrs(json!({"zone_id": "z1", "disk_size": 40}));

        let plan = p.plan(
            "zenlayercloud_disk",
            Some(("disk-1", &prior)),
            &attrs(json!({"zone_id": "z2", "disk_size": 40})),
        );
        assert_eq!(plan.requires_replace, vec!["zone_id".to_string()]);

        let plan = p.plan(
            "zenlayercloud_disk",
            Some(("disk-1", &prior)),
            &attrs(json!({"zone_id": "z1", "disk_size": 30})),
        );
        assert!(!plan.is_success());

        let plan = p.plan("zenlayercloud_disk", None, &attrs(json!({"zone_id": "z1"})));
        assert!(plan.is_success());
        assert!(!plan.requires_replace());
    }

    #[test]
    fn test_unknown_kind() {
        let p = provider();
        assert_eq!(p.validate("zenlayercloud_nope", &Attributes::new()).len(), 1);
    }

    #[test]
    fn test_retry_delay_for_attempt() {
        let config = RetryConfig {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        };

        assert_eq!(config.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(config.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(config.delay_for_attempt(3), Duration::from_secs(8));
        assert_eq!(config.delay_for_attempt(4), Duration::from_secs(10)); // capped at max
    }
}
