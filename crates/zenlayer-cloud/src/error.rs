//! Reconciliation error types

use thiserror::Error;
use zenlayer_sdk::SdkError;

/// Remote codes that mean "the resource is gone"
pub const NOT_FOUND_CODES: &[&str] = &[
    "ResourceNotFound",
    "INVALID_VPC_NOT_FOUND",
    "INVALID_DISK_NOT_FOUND",
    "INVALID_NIC_NOT_FOUND",
    "INVALID_VPC_ROUTE_NOT_FOUND",
    "INVALID_NAT_NOT_FOUND",
    "INVALID_INSTANCE_NOT_FOUND",
    "INVALID_ZBG_NOT_FOUND",
    "INVALID_DISK_SNAPSHOT_NOT_FOUND",
    "INVALID_AUTO_SNAPSHOT_POLICY_NOT_FOUND",
];

/// Errors produced while reconciling a resource
#[derive(Error, Debug)]
pub enum CloudError {
    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{resource} is in unexpected state {state:?}, expected one of {expected:?}")]
    UnexpectedState {
        resource: String,
        state: String,
        expected: Vec<String>,
    },

    #[error("{resource} entered failed state {state:?}")]
    FailedState { resource: String, state: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    #[error("Invalid identifier {id:?}: {reason}")]
    InvalidId { id: String, reason: String },

    #[error("Unexpected API response: {0}")]
    Contract(String),

    #[error("Unsupported change: {0}")]
    Unsupported(String),

    #[error("Invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract(message.into())
    }

    /// Structured remote error code, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            CloudError::Sdk(e) => e.code(),
            _ => None,
        }
    }

    /// Whether this error means the remote object does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            CloudError::NotFound(_) => true,
            other => other.code().is_some_and(is_not_found_code),
        }
    }
}

pub fn is_not_found_code(code: &str) -> bool {
    NOT_FOUND_CODES.contains(&code)
}

pub type Result<T> = std::result::Result<T, CloudError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let err = CloudError::from(SdkError::api("INVALID_DISK_NOT_FOUND", "disk gone"));
        assert!(err.is_not_found());
        assert_eq!(err.code(), Some("INVALID_DISK_NOT_FOUND"));

        let err = CloudError::from(SdkError::api("INVALID_PARAMETER", "bad"));
        assert!(!err.is_not_found());

        assert!(CloudError::NotFound("vpc-1".into()).is_not_found());
        assert!(!CloudError::Timeout("x".into()).is_not_found());
    }
}
