//! Zenlayer Cloud provider configuration
//!
//! 設定値は以下の優先順位で解決する:
//! 1. ホストから明示的に渡された値
//! 2. 環境変数 (`ACCESS_KEY_ID`, `ACCESS_KEY_PASSWORD`, `ZENLAYERCLOUD_*`)
//! 3. 認証情報ファイル (`ZENLAYER_CREDENTIALS_FILE` または
//!    `~/.config/zenlayer/credentials.yaml`)

pub mod error;

pub use error::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_ACCESS_KEY_ID: &str = "ACCESS_KEY_ID";
pub const ENV_ACCESS_KEY_PASSWORD: &str = "ACCESS_KEY_PASSWORD";
pub const ENV_DOMAIN: &str = "ZENLAYERCLOUD_DOMAIN";
pub const ENV_SCHEME: &str = "ZENLAYERCLOUD_SCHEME";
pub const ENV_CLIENT_TIMEOUT: &str = "ZENLAYERCLOUD_CLIENT_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "ZENLAYERCLOUD_MAX_RETRIES";
pub const ENV_CREDENTIALS_FILE: &str = "ZENLAYER_CREDENTIALS_FILE";

pub const DEFAULT_DOMAIN: &str = "console.zenlayer.com";
pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// 部分的な設定 (どのソースからも一部だけ与えられうる)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    pub access_key_id: Option<String>,
    pub access_key_password: Option<String>,
    pub domain: Option<String>,
    pub scheme: Option<String>,
    /// 秒
    pub client_timeout: Option<u64>,
    pub max_retries: Option<u32>,
}

impl PartialConfig {
    /// 環境変数から読み込む
    pub fn from_env() -> Result<Self> {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let client_timeout = match var(ENV_CLIENT_TIMEOUT) {
            Some(v) => Some(v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "client_timeout",
                message: format!("{ENV_CLIENT_TIMEOUT}={v} is not a number of seconds"),
            })?),
            None => None,
        };
        let max_retries = match var(ENV_MAX_RETRIES) {
            Some(v) => Some(v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "max_retries",
                message: format!("{ENV_MAX_RETRIES}={v} is not a number"),
            })?),
            None => None,
        };

        Ok(Self {
            access_key_id: var(ENV_ACCESS_KEY_ID),
            access_key_password: var(ENV_ACCESS_KEY_PASSWORD),
            domain: var(ENV_DOMAIN),
            scheme: var(ENV_SCHEME),
            client_timeout,
            max_retries,
        })
    }

    /// YAMLの認証情報ファイルから読み込む
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `self` の値を優先し、欠けている値を `lower` で補う
    pub fn or(self, lower: PartialConfig) -> Self {
        Self {
            access_key_id: self.access_key_id.or(lower.access_key_id),
            access_key_password: self.access_key_password.or(lower.access_key_password),
            domain: self.domain.or(lower.domain),
            scheme: self.scheme.or(lower.scheme),
            client_timeout: self.client_timeout.or(lower.client_timeout),
            max_retries: self.max_retries.or(lower.max_retries),
        }
    }
}

/// 解決済みのプロバイダー設定
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub access_key_id: String,
    pub access_key_password: String,
    pub domain: String,
    pub scheme: String,
    pub client_timeout: Duration,
    pub max_retries: u32,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_password", &"<redacted>")
            .field("domain", &self.domain)
            .field("scheme", &self.scheme)
            .field("client_timeout", &self.client_timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl TryFrom<PartialConfig> for ProviderConfig {
    type Error = ConfigError;

    fn try_from(partial: PartialConfig) -> Result<Self> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let access_key_id = non_empty(partial.access_key_id)
            .ok_or(ConfigError::MissingCredential("access_key_id"))?;
        let access_key_password = non_empty(partial.access_key_password)
            .ok_or(ConfigError::MissingCredential("access_key_password"))?;

        let scheme = non_empty(partial.scheme).unwrap_or_else(|| DEFAULT_SCHEME.to_string());
        if scheme != "https" && scheme != "http" {
            return Err(ConfigError::InvalidValue {
                key: "scheme",
                message: format!("{scheme} (expected http or https)"),
            });
        }

        let client_timeout = partial.client_timeout.unwrap_or(DEFAULT_CLIENT_TIMEOUT_SECS);
        if client_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                key: "client_timeout",
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            access_key_id,
            access_key_password,
            domain: non_empty(partial.domain).unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            scheme,
            client_timeout: Duration::from_secs(client_timeout),
            max_retries: partial.max_retries.unwrap_or(DEFAULT_MAX_RETRIES).max(1),
        })
    }
}

/// 認証情報ファイルを探す
///
/// 1. 環境変数 ZENLAYER_CREDENTIALS_FILE (直接パス指定)
/// 2. ~/.config/zenlayer/credentials.yaml
pub fn find_credentials_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(ENV_CREDENTIALS_FILE) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
        tracing::warn!(path = %path.display(), "{} points to a missing file", ENV_CREDENTIALS_FILE);
    }

    let path = dirs::config_dir()?.join("zenlayer").join("credentials.yaml");
    path.exists().then_some(path)
}

/// 明示値・環境変数・認証情報ファイルを合成して設定を解決する
pub fn resolve(explicit: PartialConfig) -> Result<ProviderConfig> {
    let mut merged = explicit.or(PartialConfig::from_env()?);

    if let Some(path) = find_credentials_file() {
        tracing::debug!(path = %path.display(), "reading credentials file");
        merged = merged.or(PartialConfig::from_file(&path)?);
    }

    ProviderConfig::try_from(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    const CLEAN_ENV: [(&str, Option<&str>); 7] = [
        (ENV_ACCESS_KEY_ID, None),
        (ENV_ACCESS_KEY_PASSWORD, None),
        (ENV_DOMAIN, None),
        (ENV_SCHEME, None),
        (ENV_CLIENT_TIMEOUT, None),
        (ENV_MAX_RETRIES, None),
        (ENV_CREDENTIALS_FILE, Some("/nonexistent/zenlayer/credentials.yaml")),
    ];

    fn explicit(id: &str, password: &str) -> PartialConfig {
        PartialConfig {
            access_key_id: Some(id.to_string()),
            access_key_password: Some(password.to_string()),
            ..Default::default()
        }
    }

    #[test]
    #[serial]
    fn test_explicit_values_win() {
        temp_env::with_vars(
            [
                (ENV_ACCESS_KEY_ID, Some("env-id")),
                (ENV_ACCESS_KEY_PASSWORD, Some("env-pw")),
                (ENV_CREDENTIALS_FILE, Some("/nonexistent/zenlayer/credentials.yaml")),
            ],
            || {
                let config = resolve(explicit("host-id", "host-pw")).unwrap();
                assert_eq!(config.access_key_id, "host-id");
                assert_eq!(config.access_key_password, "host-pw");
                assert_eq!(config.domain, DEFAULT_DOMAIN);
                assert_eq!(config.scheme, "https");
                assert_eq!(config.client_timeout, Duration::from_secs(300));
            },
        );
    }

    #[test]
    #[serial]
    fn test_env_fills_missing_values() {
        temp_env::with_vars(
            [
                (ENV_ACCESS_KEY_ID, Some("env-id")),
                (ENV_ACCESS_KEY_PASSWORD, Some("env-pw")),
                (ENV_DOMAIN, Some("api.example.test")),
                (ENV_CLIENT_TIMEOUT, Some("60")),
                (ENV_CREDENTIALS_FILE, Some("/nonexistent/zenlayer/credentials.yaml")),
            ],
            || {
                let config = resolve(PartialConfig::default()).unwrap();
                assert_eq!(config.access_key_id, "env-id");
                assert_eq!(config.domain, "api.example.test");
                assert_eq!(config.client_timeout, Duration::from_secs(60));
            },
        );
    }

    #[test]
    #[serial]
    fn test_credentials_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("credentials.yaml");
        fs::write(
            &path,
            "access_key_id: file-id\naccess_key_password: file-pw\nmax_retries: 5\n",
        )
        .unwrap();

        let mut vars = CLEAN_ENV;
        vars[6] = (ENV_CREDENTIALS_FILE, path.to_str());
        temp_env::with_vars(vars, || {
            assert_eq!(find_credentials_file(), Some(path.clone()));
            let config = resolve(PartialConfig::default()).unwrap();
            assert_eq!(config.access_key_id, "file-id");
            assert_eq!(config.access_key_password, "file-pw");
            assert_eq!(config.max_retries, 5);
        });
    }

    #[test]
    #[serial]
    fn test_missing_credentials_is_fatal() {
        temp_env::with_vars(CLEAN_ENV, || {
            let err = resolve(PartialConfig::default()).unwrap_err();
            assert!(matches!(err, ConfigError::MissingCredential("access_key_id")));
            assert!(err.to_string().contains("ACCESS_KEY_ID"));

            let err = resolve(explicit("id", "  ")).unwrap_err();
            assert!(matches!(err, ConfigError::MissingCredential("access_key_password")));
        });
    }

    #[test]
    #[serial]
    fn test_invalid_env_values() {
        let mut vars = CLEAN_ENV;
        vars[4] = (ENV_CLIENT_TIMEOUT, Some("soon"));
        temp_env::with_vars(vars, || {
            let err = resolve(explicit("id", "pw")).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { key: "client_timeout", .. }));
        });

        let mut vars = CLEAN_ENV;
        vars[3] = (ENV_SCHEME, Some("ftp"));
        temp_env::with_vars(vars, || {
            let err = resolve(explicit("id", "pw")).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { key: "scheme", .. }));
        });
    }

    #[test]
    fn test_malformed_credentials_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("credentials.yaml");
        fs::write(&path, "access_key_id: [unterminated").unwrap();

        let err = PartialConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ProviderConfig::try_from(explicit("id", "secret")).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
