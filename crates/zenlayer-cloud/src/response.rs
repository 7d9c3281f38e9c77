//! Results returned to the host

use crate::data::Attributes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

/// Outcome of create / read / update / delete / import
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyResponse {
    /// New state; `None` when the resource no longer exists
    pub state: Option<Attributes>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ApplyResponse {
    pub fn is_success(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn id(&self) -> Option<&str> {
        self.state
            .as_ref()
            .and_then(|s| s.get("id"))
            .and_then(|v| v.as_str())
            .filter(|id| !id.is_empty())
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(summary, detail));
    }
}

/// Outcome of planning a change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanResponse {
    /// Attributes whose change forces a replacement
    pub requires_replace: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PlanResponse {
    pub fn is_success(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn requires_replace(&self) -> bool {
        !self.requires_replace.is_empty()
    }
}

/// Outcome of a data-source query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSourceResponse {
    pub id: String,
    pub state: Attributes,
    pub diagnostics: Vec<Diagnostic>,
}

impl DataSourceResponse {
    pub fn is_success(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_response_status() {
        let mut resp = ApplyResponse::default();
        resp.diagnostics.push(Diagnostic::warning("gone", "vpc-1 disappeared"));
        assert!(resp.is_success());
        assert_eq!(resp.id(), None);

        resp.add_error("create zec_vpc failed", "boom");
        assert!(!resp.is_success());
    }

    #[test]
    fn test_apply_response_id() {
        let mut state = Attributes::new();
        state.insert("id".into(), json!("vpc-1"));
        let resp = ApplyResponse {
            state: Some(state),
            diagnostics: Vec::new(),
        };
        assert_eq!(resp.id(), Some("vpc-1"));
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
