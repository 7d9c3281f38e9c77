use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "{0} is not configured. Set it explicitly, via the {env} environment variable, \
        or in the credentials file (~/.config/zenlayer/credentials.yaml or ZENLAYER_CREDENTIALS_FILE)",
        env = .0.to_uppercase()
    )]
    MissingCredential(&'static str),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
