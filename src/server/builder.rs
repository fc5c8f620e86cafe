// ────────────────────────────────
// src/server/builder.rs
// ────────────────────────────────
use super::error::ServerError;
use super::handler::{ProbeHandler, DEFAULT_DRAIN_TIMEOUT};
use super::listener::bind_tcp;
use super::probe::ProbeServer;
use crate::config::ServerConfig;
use crate::health::{CallbackSource, Checker, StatusSource};
use std::sync::Arc;
use std::time::Duration;

/// Builder so `main.rs` can inject a checker (or any status callback).
///
/// There is a single status source slot: `with_checker`, `with_callback`
/// and `with_source` each replace whatever was set before.
pub struct ProbeServerBuilder {
    host: String,
    port: u16,
    source: Option<Arc<dyn StatusSource>>,
    drain_timeout: Duration,
}

impl ProbeServerBuilder {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            source: None,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.host.clone(), config.port).with_drain_timeout(config.drain_timeout())
    }

    pub fn with_checker(self, checker: Arc<Checker>) -> Self {
        self.with_source(checker)
    }

    /// Serve whatever `callback` returns as `(healthy, description)`.
    pub fn with_callback<F>(self, callback: F) -> Self
    where
        F: Fn() -> (bool, String) + Send + Sync + 'static,
    {
        self.with_source(Arc::new(CallbackSource::new(callback)))
    }

    pub fn with_source(mut self, source: Arc<dyn StatusSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_drain_timeout(mut self, drain_timeout: Duration) -> Self {
        self.drain_timeout = drain_timeout;
        self
    }

    /// Consume the builder and bind the TCP listener.
    ///
    /// Fails with [`ServerError::MissingStatusSource`] before touching the
    /// network when no status source was configured.
    pub async fn bind(self) -> Result<ProbeServer, ServerError> {
        let source = self.source.ok_or(ServerError::MissingStatusSource)?;
        let listener = bind_tcp(&self.host, self.port).await?;

        Ok(ProbeServer::new(
            listener,
            ProbeHandler::new(source, self.drain_timeout),
        ))
    }
}
