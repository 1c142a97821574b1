use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_SCYLLA_URI: &str = "127.0.0.1:9042";
const DEFAULT_SCYLLA_KEYSPACE: &str = "school";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub scylla_uri: String,
    pub scylla_keyspace: String,
    pub bind_address: SocketAddr,
}

impl Config {
    /// `.env`があれば読み込んだうえで環境変数から設定を組み立てる
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| dotenvy::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>
    {
        let scylla_uri = var("SCYLLA_URI")
            .unwrap_or_else(|| DEFAULT_SCYLLA_URI.to_owned());

        let scylla_keyspace = var("SCYLLA_KEYSPACE")
            .unwrap_or_else(|| DEFAULT_SCYLLA_KEYSPACE.to_owned());

        if scylla_keyspace.is_empty() {
            return Err(ConfigError::EmptyKeyspace);
        }

        let bind_address = var("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned());

        let bind_address = bind_address.parse()
            .map_err(|_| ConfigError::InvalidBindAddress(bind_address))?;

        Ok(Self { scylla_uri, scylla_keyspace, bind_address })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("キースペース名が空です")]
    EmptyKeyspace,
    #[error("待ち受けアドレスが不正です: {0}")]
    InvalidBindAddress(String),
}
