//! Zenlayer Cloud API façade
//!
//! Typed request/response pairs for the Zenlayer Cloud v2 API, a signing
//! HTTPS transport, and the structured error every call returns.
//!
//! # Services
//!
//! - **zec**: compute and networking (`2024-04-01`)
//! - **user**: resource groups (`2022-11-20`)
//! - **traffic**: bandwidth clusters (`2022-11-20`)
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use zenlayer_sdk::{ApiClient, Credential, HttpTransport, TransportConfig, zec};
//!
//! let credential = Credential::new("ak-id", "ak-password")?;
//! let transport = Arc::new(HttpTransport::new(credential, TransportConfig::default())?);
//! let client = ApiClient::new(transport, zec::SERVICE, zec::VERSION);
//!
//! let vpcs = client.send(&zec::DescribeVpcsRequest::default()).await?;
//! ```

pub mod client;
pub mod credential;
pub mod error;
pub mod traffic;
pub mod transport;
pub mod user;
pub mod zec;

pub use client::{ApiClient, Empty, PagedRequest, PagedResponse, Request, strip_nulls};
pub use credential::Credential;
pub use error::{Result, SdkError};
pub use transport::{ApiRequest, HttpTransport, Transport, TransportConfig};
