// src/config/models.rs
use anyhow::{bail, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    /// Components reported healthy as soon as the probe server is up.
    #[serde(default)]
    pub components: Vec<String>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        if self.server.drain_timeout_ms == 0 {
            bail!("server.drain_timeout_ms must be greater than zero");
        }
        if let Some(component) = self.components.iter().find(|c| c.is_empty()) {
            bail!("component names must not be empty, got {:?}", component);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Name of the checker to serve; the default checker when absent.
    #[serde(default)]
    pub checker: Option<String>,

    #[serde(default = "default_drain_timeout_ms")]
    pub drain_timeout_ms: u64,
}

impl ServerConfig {
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            checker: None,
            drain_timeout_ms: default_drain_timeout_ms(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8888
}

fn default_drain_timeout_ms() -> u64 {
    1000
}
