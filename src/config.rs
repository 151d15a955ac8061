// ⚙️ Server Configuration - defaults overridable from the environment

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9000";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

pub const ENV_LISTEN_ADDR: &str = "RECEIPT_LISTEN_ADDR";
pub const ENV_MAX_BODY_BYTES: &str = "RECEIPT_MAX_BODY_BYTES";
pub const ENV_ENABLE_CORS: &str = "RECEIPT_ENABLE_CORS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// Largest accepted request body
    pub max_body_bytes: usize,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 9000)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup (unset variables keep defaults)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();

        if let Some(addr) = lookup(ENV_LISTEN_ADDR) {
            config.listen_addr = addr
                .trim()
                .parse()
                .with_context(|| {
                    format!("{} is not a socket address: {:?}", ENV_LISTEN_ADDR, addr)
                })?;
        }

        if let Some(limit) = lookup(ENV_MAX_BODY_BYTES) {
            config.max_body_bytes = limit
                .trim()
                .parse()
                .with_context(|| {
                    format!("{} is not a byte count: {:?}", ENV_MAX_BODY_BYTES, limit)
                })?;
        }

        if let Some(flag) = lookup(ENV_ENABLE_CORS) {
            config.enable_cors = parse_flag(&flag)
                .with_context(|| format!("{} must be true or false: {:?}", ENV_ENABLE_CORS, flag))?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
