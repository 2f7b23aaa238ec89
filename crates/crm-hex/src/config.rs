use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_CLIENTS_FILE: &str = "data/clients.json";
pub const DEFAULT_ORDERS_FILE: &str = "data/orders.json";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: String,
    pub clients_file: PathBuf,
    pub orders_file: PathBuf,
    /// Put the read-through cache in front of the client repository.
    pub cache_clients: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let server_port = lookup("SERVER_PORT").unwrap_or_else(|| "3000".into());
        let clients_file = lookup("CRM_CLIENTS_FILE")
            .unwrap_or_else(|| DEFAULT_CLIENTS_FILE.into())
            .into();
        let orders_file = lookup("CRM_ORDERS_FILE")
            .unwrap_or_else(|| DEFAULT_ORDERS_FILE.into())
            .into();
        let cache_clients = match lookup("CRM_CACHE_CLIENTS") {
            Some(v) => v
                .parse()
                .map_err(|_| anyhow::anyhow!("CRM_CACHE_CLIENTS must be true or false, got {v:?}"))?,
            None => true,
        };
        Ok(Self {
            server_port,
            clients_file,
            orders_file,
            cache_clients,
        })
    }
}
