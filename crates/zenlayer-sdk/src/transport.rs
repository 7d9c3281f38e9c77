//! Transport layer
//!
//! [`Transport`] is the seam between typed requests and the wire. The
//! production implementation, [`HttpTransport`], signs each call with
//! `ZC2-HMAC-SHA256` and posts it to `{scheme}://{domain}/api/v2/{service}`.

use crate::credential::Credential;
use crate::error::{Result, SdkError};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

pub const DEFAULT_DOMAIN: &str = "console.zenlayer.com";
pub const DEFAULT_SCHEME: &str = "https";
pub const SIGNATURE_METHOD: &str = "ZC2-HMAC-SHA256";

const SIGNED_HEADERS: &str = "content-type;host";
const CONTENT_TYPE: &str = "application/json";

type HmacSha256 = Hmac<Sha256>;

/// One outgoing API call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub service: &'static str,
    pub version: &'static str,
    pub action: &'static str,
    pub body: serde_json::Value,
}

/// Sends an [`ApiRequest`] and returns the decoded `response` payload.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, request: ApiRequest) -> Result<serde_json::Value>;
}

/// Connection settings for [`HttpTransport`]
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub scheme: String,
    pub domain: String,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            timeout: Duration::from_secs(300),
        }
    }
}

/// Signed HTTPS transport
pub struct HttpTransport {
    client: reqwest::Client,
    credential: Credential,
    config: TransportConfig,
}

impl HttpTransport {
    pub fn new(credential: Credential, config: TransportConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("zenlayer-provider/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            credential,
            config,
        })
    }

    fn endpoint(&self, service: &str) -> String {
        format!(
            "{}://{}/api/v2/{}",
            self.config.scheme, self.config.domain, service
        )
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, request: ApiRequest) -> Result<serde_json::Value> {
        let payload = serde_json::to_vec(&request.body).map_err(|e| SdkError::Decode {
            action: request.action.to_string(),
            message: e.to_string(),
        })?;
        let timestamp = chrono::Utc::now().timestamp();
        let authorization = authorization(&self.credential, &self.config.domain, timestamp, &payload)?;

        tracing::debug!(
            service = request.service,
            action = request.action,
            "sending Zenlayer API request"
        );

        let response = self
            .client
            .post(self.endpoint(request.service))
            .header("Content-Type", CONTENT_TYPE)
            .header("Host", &self.config.domain)
            .header("X-ZC-Action", request.action)
            .header("X-ZC-Version", request.version)
            .header("X-ZC-Timestamp", timestamp.to_string())
            .header("X-ZC-Signature-Method", SIGNATURE_METHOD)
            .header("Authorization", authorization)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_server_error() {
            return Err(SdkError::Http {
                status: status.as_u16(),
                body,
            });
        }

        decode_envelope(request.action, status.as_u16(), &body)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    #[serde(default)]
    request_id: String,
    response: Option<serde_json::Value>,
    code: Option<String>,
    message: Option<String>,
}

/// Split the wire envelope into either the payload or a structured error
pub(crate) fn decode_envelope(action: &str, status: u16, body: &str) -> Result<serde_json::Value> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if status >= 400 => {
            return Err(SdkError::Http {
                status,
                body: body.to_string(),
            });
        }
        Err(e) => {
            return Err(SdkError::Decode {
                action: action.to_string(),
                message: e.to_string(),
            });
        }
    };

    if let Some(code) = envelope.code.filter(|c| !c.is_empty()) {
        tracing::debug!(action, code = %code, request_id = %envelope.request_id, "API returned an error");
        return Err(SdkError::Api {
            code,
            message: envelope.message.unwrap_or_default(),
            request_id: envelope.request_id,
        });
    }

    Ok(envelope
        .response
        .unwrap_or_else(|| serde_json::Value::Object(Default::default())))
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Build the `Authorization` header value
pub(crate) fn authorization(
    credential: &Credential,
    domain: &str,
    timestamp: i64,
    payload: &[u8],
) -> Result<String> {
    let canonical_request = format!(
        "POST\n/\n\ncontent-type:{}\nhost:{}\n\n{}\n{}",
        CONTENT_TYPE,
        domain,
        SIGNED_HEADERS,
        sha256_hex(payload)
    );
    let string_to_sign = format!(
        "{}\n{}\n{}",
        SIGNATURE_METHOD,
        timestamp,
        sha256_hex(canonical_request.as_bytes())
    );

    let mut mac = HmacSha256::new_from_slice(credential.access_key_password().as_bytes())
        .map_err(|e| SdkError::Credential(e.to_string()))?;
    mac.update(string_to_sign.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    Ok(format!(
        "{} Credential={}, SignedHeaders={}, Signature={}",
        SIGNATURE_METHOD,
        credential.access_key_id(),
        SIGNED_HEADERS,
        signature
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_is_deterministic() {
        let cred = Credential::new("AKID", "secret").unwrap();
        let a = authorization(&cred, DEFAULT_DOMAIN, 1_700_000_000, b"{}").unwrap();
        let b = authorization(&cred, DEFAULT_DOMAIN, 1_700_000_000, b"{}").unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("ZC2-HMAC-SHA256 Credential=AKID, SignedHeaders=content-type;host, Signature="));

        let other = authorization(&cred, DEFAULT_DOMAIN, 1_700_000_001, b"{}").unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn test_decode_success_envelope() {
        let body = r#"{"requestId":"req-1","response":{"vpcId":"vpc-1"}}"#;
        let value = decode_envelope("CreateVpc", 200, body).unwrap();
        assert_eq!(value["vpcId"], "vpc-1");
    }

    #[test]
    fn test_decode_error_envelope() {
        let body = r#"{"requestId":"req-2","code":"INVALID_VPC_NOT_FOUND","message":"not found"}"#;
        let err = decode_envelope("DescribeVpcs", 400, body).unwrap_err();
        assert_eq!(err.code(), Some("INVALID_VPC_NOT_FOUND"));
    }

    #[test]
    fn test_decode_garbage_with_error_status() {
        let err = decode_envelope("DescribeVpcs", 404, "<html>").unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_missing_response_is_empty_object() {
        let value = decode_envelope("DeleteVpc", 200, r#"{"requestId":"r"}"#).unwrap();
        assert!(value.as_object().unwrap().is_empty());
    }
}
