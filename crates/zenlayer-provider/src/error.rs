//! Provider initialization errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Configuration error: {0}")]
    Config(#[from] zenlayer_config::ConfigError),

    #[error("Client error: {0}")]
    Sdk(#[from] zenlayer_sdk::SdkError),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
