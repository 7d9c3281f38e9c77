//! In-memory stand-in for the Zenlayer API
//!
//! Describe actions are served from per-kind tables with pagination and
//! id filtering. Every other action is logged and answered by a handler
//! registered with [`FakeCloud::on`], or with an empty success.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use zenlayer_cloud::{Attributes, Provider};
use zenlayer_provider::{ZenlayerClient, provider_with_client};
use zenlayer_sdk::{ApiRequest, SdkError, Transport};

/// Describe action, id filter parameter, id field of a row
const TABLES: &[(&str, &str, &str)] = &[
    ("DescribeVpcs", "vpcIds", "vpcId"),
    ("DescribeSubnets", "subnetIds", "subnetId"),
    ("DescribeNetworkInterfaces", "nicIds", "nicId"),
    ("DescribeDisks", "diskIds", "diskId"),
    ("DescribeSnapshots", "snapshotIds", "snapshotId"),
    ("DescribeAutoSnapshotPolicies", "autoSnapshotPolicyIds", "autoSnapshotPolicyId"),
    ("DescribeEips", "eipIds", "eipId"),
    ("DescribeCidrs", "cidrIds", "cidrId"),
    ("DescribeInstances", "instanceIds", "instanceId"),
    ("DescribeNatGateways", "natGatewayIds", "natGatewayId"),
    ("DescribeSecurityGroups", "securityGroupIds", "securityGroupId"),
    ("DescribeBorderGateways", "zbgIds", "zbgId"),
    ("DescribeVpcRoutes", "routeIds", "routeId"),
    ("DescribeResourceGroups", "resourceGroupIds", "resourceGroupId"),
    ("DescribeBandwidthClusters", "bandwidthClusterIds", "bandwidthClusterId"),
];

pub type Handler = Box<dyn FnMut(&Value, &mut World) -> Result<Value, SdkError> + Send>;

/// Remote objects and their scripted status sequences
#[derive(Default)]
pub struct World {
    tables: BTreeMap<&'static str, Vec<Value>>,
    scripts: HashMap<String, VecDeque<String>>,
}

fn table_for(action: &str) -> Option<&'static (&'static str, &'static str, &'static str)> {
    TABLES.iter().find(|(name, _, _)| *name == action)
}

fn row_id<'a>(row: &'a Value, id_field: &str) -> &'a str {
    row.get(id_field).and_then(Value::as_str).unwrap_or_default()
}

impl World {
    pub fn insert(&mut self, describe: &'static str, row: Value) {
        assert!(table_for(describe).is_some(), "no table for {describe}");
        self.tables.entry(describe).or_default().push(row);
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Value> {
        self.tables.iter_mut().find_map(|(action, rows)| {
            let (_, _, id_field) = table_for(action)?;
            rows.iter_mut().find(|row| row_id(row, id_field) == id)
        })
    }

    pub fn get(&self, id: &str) -> Option<Value> {
        self.tables.iter().find_map(|(action, rows)| {
            let (_, _, id_field) = table_for(action)?;
            rows.iter().find(|row| row_id(row, id_field) == id).cloned()
        })
    }

    pub fn set(&mut self, id: &str, key: &str, value: Value) {
        if let Some(Value::Object(row)) = self.get_mut(id) {
            row.insert(key.to_string(), value);
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.scripts.remove(id);
        for (action, rows) in self.tables.iter_mut() {
            let Some((_, _, id_field)) = table_for(action) else { continue };
            if let Some(pos) = rows.iter().position(|row| row_id(row, id_field) == id) {
                rows.remove(pos);
                return true;
            }
        }
        false
    }

    /// Statuses reported by successive describes; the last one sticks
    pub fn script(&mut self, id: &str, statuses: &[&str]) {
        self.scripts
            .insert(id.to_string(), statuses.iter().map(|s| s.to_string()).collect());
    }

    fn describe(&mut self, action: &str, body: &Value) -> Value {
        let Some(&(table, ids_param, id_field)) = table_for(action) else {
            return json!({"totalCount": 0, "dataSet": []});
        };
        let wanted: Vec<&str> = body
            .get(ids_param)
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let rows = self.tables.entry(table).or_default();
        let mut matched = Vec::new();
        for row in rows.iter_mut() {
            let id = row_id(row, id_field).to_string();
            if !wanted.is_empty() && !wanted.contains(&id.as_str()) {
                continue;
            }
            if let Some(queue) = self.scripts.get_mut(&id) {
                let status = if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() };
                if let (Some(status), Value::Object(map)) = (status, &mut *row) {
                    map.insert("status".to_string(), Value::String(status));
                }
            }
            matched.push(row.clone());
        }

        let page_num = body.get("pageNum").and_then(Value::as_u64).unwrap_or(1).max(1) as usize;
        let page_size = body.get("pageSize").and_then(Value::as_u64).unwrap_or(100).max(1) as usize;
        let total = matched.len();
        let page: Vec<Value> = matched.into_iter().skip((page_num - 1) * page_size).take(page_size).collect();
        json!({"totalCount": total, "dataSet": page})
    }
}

#[derive(Default)]
struct Inner {
    world: World,
    handlers: HashMap<&'static str, Handler>,
    failures: HashMap<&'static str, VecDeque<SdkError>>,
    calls: Vec<(String, Value)>,
}

#[derive(Default)]
pub struct FakeCloud {
    inner: Mutex<Inner>,
}

#[allow(dead_code)]
impl FakeCloud {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn provider(self: &Arc<Self>) -> Provider<ZenlayerClient> {
        provider_with_client(ZenlayerClient::with_transport(self.clone()), 3)
    }

    pub fn world<T>(&self, f: impl FnOnce(&mut World) -> T) -> T {
        f(&mut self.inner.lock().unwrap().world)
    }

    pub fn insert(&self, describe: &'static str, row: Value) {
        self.world(|w| w.insert(describe, row));
    }

    pub fn script(&self, id: &str, statuses: &[&str]) {
        self.world(|w| w.script(id, statuses));
    }

    pub fn on(
        &self,
        action: &'static str,
        handler: impl FnMut(&Value, &mut World) -> Result<Value, SdkError> + Send + 'static,
    ) {
        self.inner.lock().unwrap().handlers.insert(action, Box::new(handler));
    }

    /// Fail the next call of `action`
    pub fn fail(&self, action: &'static str, error: SdkError) {
        self.inner
            .lock()
            .unwrap()
            .failures
            .entry(action)
            .or_default()
            .push_back(error);
    }

    /// Actions called so far, describes included
    pub fn actions(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.iter().map(|(a, _)| a.clone()).collect()
    }

    /// Non-describe actions called so far
    pub fn mutations(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter(|a| !a.starts_with("Describe"))
            .collect()
    }

    /// Bodies sent with `action`
    pub fn bodies(&self, action: &str) -> Vec<Value> {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|(a, _)| a == action)
            .map(|(_, b)| b.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for FakeCloud {
    async fn call(&self, request: ApiRequest) -> zenlayer_sdk::Result<Value> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push((request.action.to_string(), request.body.clone()));

        if let Some(error) = inner.failures.get_mut(request.action).and_then(VecDeque::pop_front) {
            return Err(error);
        }
        let Inner { world, handlers, .. } = &mut *inner;
        if let Some(handler) = handlers.get_mut(request.action) {
            return handler(&request.body, world);
        }
        if request.action.starts_with("Describe") {
            return Ok(world.describe(request.action, &request.body));
        }
        Ok(json!({"requestId": "fake-request"}))
    }
}

pub fn attrs(value: Value) -> Attributes {
    value.as_object().cloned().unwrap_or_default()
}

pub fn cancel() -> CancellationToken {
    CancellationToken::new()
}

pub fn not_found(code: &str) -> SdkError {
    SdkError::api(code, "the object does not exist")
}
