// ────────────────────────────────
// src/server/listener.rs
// Encapsulates low‑level TCP bind so the probe loop only deals with accepted streams.
// ────────────────────────────────
use super::error::ServerError;
use tokio::net::TcpListener;

/// Bind `host:port`. `host` may be an IP literal or a resolvable name.
pub async fn bind_tcp(host: &str, port: u16) -> Result<TcpListener, ServerError> {
    TcpListener::bind((host, port))
        .await
        .map_err(|source| ServerError::Bind {
            addr: format!("{}:{}", host, port),
            source,
        })
}
