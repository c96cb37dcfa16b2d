// ⚙️ Server configuration
//
// Read from the environment:
//   COOKBOOK_BIND_ADDR  listen address (default: 127.0.0.1:8080)
//   COOKBOOK_LOG        tracing filter (default: info,cookbook=debug)

use anyhow::{Context, Result};
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_LOG_FILTER: &str = "info,cookbook=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source (the environment, or a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("COOKBOOK_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("COOKBOOK_BIND_ADDR is not a socket address: {bind_addr:?}"))?;

        let log_filter = lookup("COOKBOOK_LOG")
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(ServerConfig {
            bind_addr,
            log_filter,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
