//! Declarative resource schemas and the validator that runs before any
//! remote call

use crate::data::Attributes;
use crate::error::{CloudError, Result};
use serde_json::Value;
use std::net::IpAddr;
use std::time::Duration;

/// JSON shape of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Int,
    Bool,
    Float,
    List,
    Set,
    Object,
}

impl AttributeType {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Int => value.is_i64() || value.is_u64(),
            AttributeType::Bool => value.is_boolean(),
            AttributeType::Float => value.is_number(),
            AttributeType::List | AttributeType::Set => value.is_array(),
            AttributeType::Object => value.is_object(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Required,
    Optional,
    Computed,
    OptionalComputed,
}

/// Value check; applied to each element when the value is an array
#[derive(Debug, Clone)]
pub enum Validator {
    IntBetween(i64, i64),
    IntAtLeast(i64),
    StringInSlice(&'static [&'static str]),
    NotEmpty,
    /// RFC 3339 timestamp in UTC (`Z` suffix)
    Rfc3339,
    Cidr,
    Ip,
    /// `"p"` or `"a-b"` with ports in 1..=65535
    PortSpec,
}

impl Validator {
    fn check(&self, name: &str, value: &Value) -> std::result::Result<(), String> {
        if let Value::Array(items) = value {
            return items.iter().try_for_each(|v| self.check(name, v));
        }
        match self {
            Validator::IntBetween(min, max) => match value.as_i64() {
                Some(n) if (*min..=*max).contains(&n) => Ok(()),
                _ => Err(format!("{name} must be between {min} and {max}, got {value}")),
            },
            Validator::IntAtLeast(min) => match value.as_i64() {
                Some(n) if n >= *min => Ok(()),
                _ => Err(format!("{name} must be at least {min}, got {value}")),
            },
            Validator::StringInSlice(allowed) => match value.as_str() {
                Some(s) if allowed.contains(&s) => Ok(()),
                _ => Err(format!("{name} must be one of {allowed:?}, got {value}")),
            },
            Validator::NotEmpty => match value.as_str() {
                Some(s) if !s.trim().is_empty() => Ok(()),
                _ => Err(format!("{name} must not be empty")),
            },
            Validator::Rfc3339 => {
                let s = value.as_str().unwrap_or_default();
                if s.ends_with('Z') && chrono::DateTime::parse_from_rfc3339(s).is_ok() {
                    Ok(())
                } else {
                    Err(format!(
                        "{name} must be an RFC 3339 UTC time like 2006-01-02T15:04:05Z, got {value}"
                    ))
                }
            }
            Validator::Cidr => {
                if value.as_str().is_some_and(is_cidr) {
                    Ok(())
                } else {
                    Err(format!("{name} must be a CIDR block, got {value}"))
                }
            }
            Validator::Ip => {
                if value.as_str().is_some_and(|s| s.parse::<IpAddr>().is_ok()) {
                    Ok(())
                } else {
                    Err(format!("{name} must be an IP address, got {value}"))
                }
            }
            Validator::PortSpec => {
                if value.as_str().is_some_and(is_port_spec) {
                    Ok(())
                } else {
                    Err(format!(
                        "{name} must be a port (1-65535) or a range like \"8000-8080\", got {value}"
                    ))
                }
            }
        }
    }
}

pub fn is_cidr(s: &str) -> bool {
    let Some((addr, prefix)) = s.split_once('/') else {
        return false;
    };
    let Ok(prefix) = prefix.parse::<u8>() else {
        return false;
    };
    match addr.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => prefix <= 32,
        Ok(IpAddr::V6(_)) => prefix <= 128,
        Err(_) => false,
    }
}

pub fn is_port_spec(s: &str) -> bool {
    let port = |p: &str| p.parse::<u16>().is_ok_and(|n| n >= 1);
    match s.split_once('-') {
        Some((a, b)) => {
            port(a) && port(b) && a.parse::<u16>().ok() <= b.parse::<u16>().ok()
        }
        None => port(s),
    }
}

/// One attribute of a resource or data source
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub attr_type: AttributeType,
    pub mode: Mode,
    pub force_new: bool,
    pub sensitive: bool,
    pub default: Option<Value>,
    pub description: Option<&'static str>,
    pub validators: Vec<Validator>,
}

impl AttributeSchema {
    /// Optional by default
    pub fn new(name: &'static str, attr_type: AttributeType) -> Self {
        Self {
            name,
            attr_type,
            mode: Mode::Optional,
            force_new: false,
            sensitive: false,
            default: None,
            description: None,
            validators: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.mode = Mode::Required;
        self
    }

    pub fn computed(mut self) -> Self {
        self.mode = Mode::Computed;
        self
    }

    pub fn optional_computed(mut self) -> Self {
        self.mode = Mode::OptionalComputed;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }
}

/// Cross-attribute constraint
#[derive(Debug, Clone)]
pub enum Rule {
    ExactlyOneOf(&'static [&'static str]),
    AtLeastOneOf(&'static [&'static str]),
    ConflictsWith(&'static str, &'static str),
    /// `attr` must be set when `when` equals `equals`
    RequiredWhen {
        attr: &'static str,
        when: &'static str,
        equals: &'static str,
    },
    /// `attr` may only be set when `when` equals `equals`
    OnlyWhen {
        attr: &'static str,
        when: &'static str,
        equals: &'static str,
    },
    Custom(fn(&Attributes) -> std::result::Result<(), String>),
}

impl Rule {
    fn check(&self, config: &Attributes) -> std::result::Result<(), String> {
        match self {
            Rule::ExactlyOneOf(names) => {
                let set: Vec<_> = names.iter().filter(|n| is_set(config, n)).collect();
                if set.len() == 1 {
                    Ok(())
                } else {
                    Err(format!("exactly one of {names:?} must be set"))
                }
            }
            Rule::AtLeastOneOf(names) => {
                if names.iter().any(|n| is_set(config, n)) {
                    Ok(())
                } else {
                    Err(format!("at least one of {names:?} must be set"))
                }
            }
            Rule::ConflictsWith(a, b) => {
                if is_set(config, a) && is_set(config, b) {
                    Err(format!("{a} conflicts with {b}"))
                } else {
                    Ok(())
                }
            }
            Rule::RequiredWhen { attr, when, equals } => {
                if str_of(config, when) == Some(*equals) && !is_set(config, attr) {
                    Err(format!("{attr} is required when {when} is {equals}"))
                } else {
                    Ok(())
                }
            }
            Rule::OnlyWhen { attr, when, equals } => {
                if is_set(config, attr) && str_of(config, when) != Some(*equals) {
                    Err(format!("{attr} can only be set when {when} is {equals}"))
                } else {
                    Ok(())
                }
            }
            Rule::Custom(check) => check(config),
        }
    }
}

fn str_of<'a>(config: &'a Attributes, name: &str) -> Option<&'a str> {
    config.get(name).and_then(Value::as_str)
}

/// Null, empty and `false` all count as unset
pub fn is_set(config: &Attributes, name: &str) -> bool {
    match config.get(name) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(Value::Number(_)) => true,
    }
}

/// Per-operation default deadlines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub create: Duration,
    pub read: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Timeouts {
    pub const fn uniform(d: Duration) -> Self {
        Self {
            create: d,
            read: d,
            update: d,
            delete: d,
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::uniform(Duration::from_secs(10 * 60))
    }
}

/// Attribute names the registry understands for every resource
pub const RESERVED: &[&str] = &["id", "timeouts"];

#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub name: String,
    pub description: Option<&'static str>,
    pub attributes: Vec<AttributeSchema>,
    pub rules: Vec<Rule>,
    pub timeouts: Timeouts,
}

impl ResourceSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            attributes: Vec::new(),
            rules: Vec::new(),
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn attribute(mut self, attribute: AttributeSchema) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn force_new_attributes(&self) -> impl Iterator<Item = &AttributeSchema> {
        self.attributes.iter().filter(|a| a.force_new)
    }

    /// Fill in declared defaults for attributes the config leaves out
    pub fn apply_defaults(&self, config: &mut Attributes) {
        for attr in &self.attributes {
            if let Some(default) = &attr.default {
                let missing = matches!(config.get(attr.name), None | Some(Value::Null));
                if missing {
                    config.insert(attr.name.to_string(), default.clone());
                }
            }
        }
    }

    /// Write `null` for optional attributes the config leaves out, so that
    /// dropping one from the configuration reads as a removal on update.
    /// Computed attributes keep whatever the remote last reported.
    pub fn null_absent(&self, config: &mut Attributes) {
        for attr in &self.attributes {
            if attr.mode == Mode::Optional && !config.contains_key(attr.name) {
                config.insert(attr.name.to_string(), Value::Null);
            }
        }
    }

    /// Check a desired configuration; every problem is reported at once
    pub fn validate(&self, config: &Attributes) -> Result<()> {
        let mut problems = Vec::new();

        for (name, value) in config {
            if value.is_null() || RESERVED.contains(&name.as_str()) {
                continue;
            }
            match self.get(name) {
                None => problems.push(format!("unsupported attribute {name}")),
                Some(attr) if attr.mode == Mode::Computed => {
                    problems.push(format!("{name} is computed and cannot be set"))
                }
                Some(attr) => {
                    if !attr.attr_type.accepts(value) {
                        problems.push(format!("{name} must be of type {:?}", attr.attr_type));
                        continue;
                    }
                    for validator in &attr.validators {
                        if let Err(p) = validator.check(name, value) {
                            problems.push(p);
                        }
                    }
                }
            }
        }

        for attr in &self.attributes {
            let missing = matches!(config.get(attr.name), None | Some(Value::Null));
            if attr.mode == Mode::Required && missing {
                problems.push(format!("{} is required", attr.name));
            }
        }

        for rule in &self.rules {
            if let Err(p) = rule.check(config) {
                problems.push(p);
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CloudError::Validation(format!(
                "{}: {}",
                self.name,
                problems.join("; ")
            )))
        }
    }
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

    fn nat_schema() -> ResourceSchema {
        ResourceSchema::new("zenlayercloud_zec_nat_gateway")
            .attribute(AttributeSchema::new("region_id", AttributeType::String).required().force_new())
            .attribute(AttributeSchema::new("name", AttributeType::String).validate(Validator::NotEmpty))
            .attribute(AttributeSchema::new("subnet_ids", AttributeType::Set))
            .attribute(AttributeSchema::new("is_all_subnets", AttributeType::Bool))
            .attribute(AttributeSchema::new("status", AttributeType::String).computed())
            .attribute(
                AttributeSchema::new("hours", AttributeType::Set).validate(Validator::IntBetween(0, 23)),
            )
            .attribute(
                AttributeSchema::new("mtu", AttributeType::Int).default_value(1500),
            )
            .rule(Rule::ExactlyOneOf(&["subnet_ids", "is_all_subnets"]))
    }

    #[test]
    fn test_validate_accepts_valid_config() {
        let schema = nat_schema();
        let config = attrs(json!({"region_id": "asia-east-1", "subnet_ids": ["s-1"]}));
        assert!(schema.validate(&config).is_ok());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let schema = nat_schema();
        let config = attrs(json!({
            "subnet_ids": ["s-1"],
            "is_all_subnets": true,
            "status": "RUNNING",
            "hours": [1, 24],
            "bogus": 1
        }));

        let err = schema.validate(&config).unwrap_err().to_string();
        assert!(err.contains("region_id is required"));
        assert!(err.contains("exactly one of"));
        assert!(err.contains("status is computed"));
        assert!(err.contains("between 0 and 23"));
        assert!(err.contains("unsupported attribute bogus"));
    }

    #[test]
    fn test_false_counts_as_unset() {
        let schema = nat_schema();
        let config = attrs(json!({"region_id": "r", "subnet_ids": ["s-1"], "is_all_subnets": false}));
        assert!(schema.validate(&config).is_ok());
    }

    #[test]
    fn test_apply_defaults() {
        let schema = nat_schema();
        let mut config = attrs(json!({"region_id": "r"}));
        schema.apply_defaults(&mut config);
        assert_eq!(config["mtu"], json!(1500));
    }

    #[test]
    fn test_null_absent_skips_computed() {
        let schema = ResourceSchema::new("t")
            .attribute(AttributeSchema::new("name", AttributeType::String))
            .attribute(AttributeSchema::new("lan_ip", AttributeType::String).optional_computed())
            .attribute(AttributeSchema::new("status", AttributeType::String).computed());
        let mut config = attrs(json!({}));
        schema.null_absent(&mut config);
        assert_eq!(config.get("name"), Some(&Value::Null));
        assert!(!config.contains_key("lan_ip"));
        assert!(!config.contains_key("status"));
    }

    #[test]
    fn test_conditional_rules() {
        let required = Rule::RequiredWhen {
            attr: "bandwidth_cluster_id",
            when: "internet_charge_type",
            equals: "BandwidthCluster",
        };
        assert!(required.check(&attrs(json!({"internet_charge_type": "BandwidthCluster"}))).is_err());
        assert!(required.check(&attrs(json!({"internet_charge_type": "ByBandwidth"}))).is_ok());

        let only = Rule::OnlyWhen {
            attr: "bind_type",
            when: "associated_type",
            equals: "NIC",
        };
        assert!(only.check(&attrs(json!({"associated_type": "NAT", "bind_type": "FullNat"}))).is_err());
        assert!(only.check(&attrs(json!({"associated_type": "NIC", "bind_type": "FullNat"}))).is_ok());
    }

    #[test]
    fn test_value_validators() {
        assert!(is_cidr("10.0.0.0/16"));
        assert!(is_cidr("2001:db8::/32"));
        assert!(!is_cidr("10.0.0.0/33"));
        assert!(!is_cidr("10.0.0.0"));

        assert!(is_port_spec("80"));
        assert!(is_port_spec("8000-8080"));
        assert!(!is_port_spec("0"));
        assert!(!is_port_spec("9000-8000"));
        assert!(!is_port_spec("http"));

        assert!(Validator::Rfc3339.check("t", &json!("2030-01-02T15:04:05Z")).is_ok());
        assert!(Validator::Rfc3339.check("t", &json!("2030-01-02T15:04:05+08:00")).is_err());
        assert!(Validator::IntAtLeast(1).check("bandwidth", &json!(0)).is_err());
    }
}
