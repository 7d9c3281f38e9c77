//! Attribute map handed to resource handlers

use crate::context::Operation;
use crate::response::Diagnostic;
use crate::schema::Timeouts;
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

pub type Attributes = serde_json::Map<String, Value>;

/// Desired and prior state of one resource instance.
///
/// Getters read the working map (prior state overlaid with the desired
/// configuration); setters write it. [`has_change`](Self::has_change)
/// compares against the prior state.
#[derive(Debug, Clone, Default)]
pub struct ResourceData {
    id: String,
    current: Attributes,
    prior: Attributes,
    committed: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
    timeouts: Timeouts,
}

impl ResourceData {
    /// Fresh resource about to be created
    pub fn new(config: Attributes) -> Self {
        Self {
            current: config,
            ..Default::default()
        }
    }

    /// Existing resource known only by its stored state
    pub fn from_state(id: impl Into<String>, prior: Attributes) -> Self {
        Self {
            id: id.into(),
            current: prior.clone(),
            prior,
            ..Default::default()
        }
    }

    /// Existing resource with a new desired configuration
    pub fn for_update(id: impl Into<String>, prior: Attributes, config: Attributes) -> Self {
        let mut current = prior.clone();
        for (k, v) in config {
            current.insert(k, v);
        }
        Self {
            id: id.into(),
            current,
            prior,
            ..Default::default()
        }
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Forget the remote object; the host will plan a recreate
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    pub fn is_new(&self) -> bool {
        self.prior.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.current.get(key).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn get_string(&self, key: &str) -> String {
        self.get_str(key).to_string()
    }

    /// Non-empty string value
    pub fn get_opt_str(&self, key: &str) -> Option<String> {
        Some(self.get_str(key)).filter(|s| !s.is_empty()).map(str::to_string)
    }

    pub fn get_i64(&self, key: &str) -> i64 {
        self.get_opt_i64(key).unwrap_or_default()
    }

    pub fn get_opt_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get_opt_bool(key).unwrap_or_default()
    }

    pub fn get_opt_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_list(&self, key: &str) -> Vec<Value> {
        self.get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// String elements in order
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get_list(key)
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    /// String elements, sorted and deduplicated
    pub fn get_string_set(&self, key: &str) -> BTreeSet<String> {
        self.get_string_list(key).into_iter().collect()
    }

    pub fn get_i64_list(&self, key: &str) -> Vec<i64> {
        self.get_list(key).iter().filter_map(Value::as_i64).collect()
    }

    pub fn is_set(&self, key: &str) -> bool {
        crate::schema::is_set(&self.current, key)
    }

    /// Prior and current value of `key`; missing values are `null`
    pub fn get_change(&self, key: &str) -> (Value, Value) {
        let old = self.prior.get(key).cloned().unwrap_or(Value::Null);
        let new = self.current.get(key).cloned().unwrap_or(Value::Null);
        (old, new)
    }

    pub fn has_change(&self, key: &str) -> bool {
        let (old, new) = self.get_change(key);
        !same_value(&old, &new)
    }

    pub fn has_changes(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.has_change(k))
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.current.insert(key.to_string(), value.into());
    }

    /// Set only when a value is present
    pub fn set_opt<T: Into<Value>>(&mut self, key: &str, value: Option<T>) {
        if let Some(v) = value {
            self.set(key, v);
        }
    }

    /// Mark attributes as applied remotely
    pub fn commit(&mut self, keys: &[&str]) {
        self.committed.extend(keys.iter().map(|k| k.to_string()));
    }

    /// Restore every changed but uncommitted attribute to its prior value
    pub fn rollback_uncommitted(&mut self) {
        let changed: Vec<String> = self
            .current
            .keys()
            .chain(self.prior.keys())
            .filter(|k| !self.committed.contains(k.as_str()))
            .filter(|k| self.has_change(k))
            .cloned()
            .collect();

        for key in changed {
            match self.prior.get(&key) {
                Some(v) => {
                    self.current.insert(key, v.clone());
                }
                None => {
                    self.current.remove(&key);
                }
            }
        }
    }

    pub fn warn(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        let summary = summary.into();
        tracing::warn!("{}", summary);
        self.diagnostics.push(Diagnostic::warning(summary, detail));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Deadline for `operation`: the `timeouts` block wins over defaults
    pub fn timeout(&self, operation: Operation) -> Duration {
        let default = match operation {
            Operation::Create => self.timeouts.create,
            Operation::Update => self.timeouts.update,
            Operation::Delete => self.timeouts.delete,
            _ => self.timeouts.read,
        };
        let key = match operation {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            _ => "read",
        };
        self.get("timeouts")
            .and_then(|t| t.get(key))
            .and_then(Value::as_str)
            .and_then(parse_duration)
            .unwrap_or(default)
    }

    /// Working map with the identifier under `id`
    pub fn state(&self) -> Attributes {
        let mut state = self.current.clone();
        state.insert("id".to_string(), Value::String(self.id.clone()));
        state
    }
}

/// Arrays are compared as sets of elements when both sides are arrays of
/// scalars, so reordering a set attribute is not a change. An absent value
/// equals the zero value of its type.
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, other) | (other, Value::Null) => is_zero(other),
        (Value::Array(x), Value::Array(y)) if x.iter().chain(y).all(|v| !v.is_object()) => {
            let xs: BTreeSet<String> = x.iter().map(Value::to_string).collect();
            let ys: BTreeSet<String> = y.iter().map(Value::to_string).collect();
            xs == ys
        }
        _ => a == b,
    }
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Parse `"30s"`, `"10m"`, `"1h30m"` and the like; zero is rejected
pub fn parse_duration(s: &str) -> Option<Duration> {
    humantime::parse_duration(s.trim()).ok().filter(|d| !d.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_getters_default_to_zero_values() {
        let d = ResourceData::new(attrs(json!({"name": "tf-vpc", "mtu": 1500, "gone": null})));
        assert_eq!(d.get_str("name"), "tf-vpc");
        assert_eq!(d.get_i64("mtu"), 1500);
        assert_eq!(d.get_str("gone"), "");
        assert_eq!(d.get_opt_str("gone"), None);
        assert!(!d.get_bool("enable_ipv6"));
        assert!(d.get_string_set("subnet_ids").is_empty());
    }

    #[test]
    fn test_change_tracking() {
        let d = ResourceData::for_update(
            "vpc-1",
            attrs(json!({"name": "a", "subnet_ids": ["s-1", "s-2"], "mtu": 1500})),
            attrs(json!({"name": "b", "subnet_ids": ["s-2", "s-1"]})),
        );
        assert!(d.has_change("name"));
        assert!(!d.has_change("subnet_ids"));
        assert!(!d.has_change("mtu"));
        assert_eq!(d.get_change("name"), (json!("a"), json!("b")));
    }

    #[test]
    fn test_dropped_attribute_is_a_change() {
        let d = ResourceData::for_update(
            "subnet-1",
            attrs(json!({"ipv6_type": "Public", "name": "", "enable_ipv6": false})),
            attrs(json!({"ipv6_type": null, "name": null, "enable_ipv6": null})),
        );
        assert!(d.has_change("ipv6_type"));
        assert!(!d.has_change("name"));
        assert!(!d.has_change("enable_ipv6"));
        assert_eq!(d.get_change("ipv6_type"), (json!("Public"), Value::Null));
    }

    #[test]
    fn test_rollback_keeps_committed() {
        let mut d = ResourceData::for_update(
            "disk-1",
            attrs(json!({"name": "a", "disk_size": 20})),
            attrs(json!({"name": "b", "disk_size": 40, "resource_group_id": "rg-1"})),
        );
        d.commit(&["name"]);
        d.rollback_uncommitted();

        assert_eq!(d.get_str("name"), "b");
        assert_eq!(d.get_i64("disk_size"), 20);
        assert!(d.get("resource_group_id").is_none());
    }

    #[test]
    fn test_timeouts() {
        let d = ResourceData::new(attrs(json!({"timeouts": {"create": "30m", "delete": "1h30m"}})))
            .with_timeouts(Timeouts::uniform(Duration::from_secs(300)));
        assert_eq!(d.timeout(Operation::Create), Duration::from_secs(1800));
        assert_eq!(d.timeout(Operation::Delete), Duration::from_secs(5400));
        assert_eq!(d.timeout(Operation::Read), Duration::from_secs(300));

        assert_eq!(parse_duration("45s"), Some(Duration::from_secs(45)));
        assert_eq!(parse_duration("2h 5m"), Some(Duration::from_secs(7500)));
        assert_eq!(parse_duration("10"), None);
        assert_eq!(parse_duration("0s"), None);
        assert_eq!(parse_duration("soon"), None);
    }

    #[test]
    fn test_state_carries_id() {
        let mut d = ResourceData::new(attrs(json!({"name": "x"})));
        d.set_id("vpc-9");
        d.set("mtu", 1500);
        let state = d.state();
        assert_eq!(state["id"], json!("vpc-9"));
        assert_eq!(state["mtu"], json!(1500));
    }
}
