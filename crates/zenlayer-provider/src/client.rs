//! Credential & client factory

use crate::error::Result;
use crate::service::{TrafficService, UserService, ZecService};
use std::sync::{Arc, OnceLock};
use zenlayer_config::ProviderConfig;
use zenlayer_sdk::{ApiClient, Credential, HttpTransport, Transport, TransportConfig, traffic, user, zec};

/// Meta object handed to every handler.
///
/// Sub-API clients are built on first use and share one transport.
pub struct ZenlayerClient {
    transport: Arc<dyn Transport>,
    zec: OnceLock<ZecService>,
    user: OnceLock<UserService>,
    traffic: OnceLock<TrafficService>,
}

impl ZenlayerClient {
    /// Fails when either credential half is empty
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let credential = Credential::new(&config.access_key_id, &config.access_key_password)?;
        let transport = HttpTransport::new(
            credential,
            TransportConfig {
                scheme: config.scheme.clone(),
                domain: config.domain.clone(),
                timeout: config.client_timeout,
            },
        )?;
        tracing::debug!(domain = %config.domain, "zenlayer client configured");
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Client over an arbitrary transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            zec: OnceLock::new(),
            user: OnceLock::new(),
            traffic: OnceLock::new(),
        }
    }

    pub fn zec(&self) -> &ZecService {
        self.zec.get_or_init(|| {
            ZecService::new(ApiClient::new(self.transport.clone(), zec::SERVICE, zec::VERSION))
        })
    }

    pub fn user(&self) -> &UserService {
        self.user.get_or_init(|| {
            UserService::new(ApiClient::new(self.transport.clone(), user::SERVICE, user::VERSION))
        })
    }

    pub fn traffic(&self) -> &TrafficService {
        self.traffic.get_or_init(|| {
            TrafficService::new(ApiClient::new(
                self.transport.clone(),
                traffic::SERVICE,
                traffic::VERSION,
            ))
        })
    }
}
