//! Zenlayer API error types

use thiserror::Error;

/// Errors surfaced by the API façade.
///
/// `Api` is the structured form: the remote answered with a stable `code`.
/// Everything else describes a failure to get such an answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("[{code}] {message} (requestId: {request_id})")]
    Api {
        code: String,
        message: String,
        request_id: String,
    },

    #[error("Failed to decode {action} response: {message}")]
    Decode { action: String, message: String },

    #[error("Invalid credential: {0}")]
    Credential(String),
}

impl SdkError {
    /// Build a structured API error, mostly useful for fakes and tests
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        SdkError::Api {
            code: code.into(),
            message: message.into(),
            request_id: String::new(),
        }
    }

    /// The remote error code, if this is a structured API error
    pub fn code(&self) -> Option<&str> {
        match self {
            SdkError::Api { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    /// HTTP status for non-2xx transport answers
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SdkError::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            SdkError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            SdkError::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_only_for_api_errors() {
        let err = SdkError::api("INVALID_VPC_NOT_FOUND", "vpc not found");
        assert_eq!(err.code(), Some("INVALID_VPC_NOT_FOUND"));
        assert_eq!(SdkError::Network("reset".into()).code(), None);
        assert_eq!(
            SdkError::Http {
                status: 502,
                body: String::new()
            }
            .status(),
            Some(502)
        );
    }
}
