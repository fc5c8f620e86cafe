// src/server/handler.rs
use super::response::ProbeResponse;
use crate::health::StatusSource;
use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::{debug, trace};

pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Answers one probe connection from the configured status source.
#[derive(Clone)]
pub struct ProbeHandler {
    source: Arc<dyn StatusSource>,
    drain_timeout: Duration,
}

impl ProbeHandler {
    pub fn new(source: Arc<dyn StatusSource>, drain_timeout: Duration) -> Self {
        Self {
            source,
            drain_timeout,
        }
    }

    /// Write the response, close our side, then drain the peer.
    ///
    /// The request is never parsed. Whatever the peer sent is read and
    /// discarded after the response so closing the socket does not reset
    /// the connection underneath a client that is still reading.
    pub async fn handle<S>(&self, mut stream: S) -> io::Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let response = ProbeResponse::from(self.source.status());
        trace!(status = %response.status(), "Writing probe response");

        stream.write_all(&response.into_bytes()).await?;
        stream.flush().await?;
        stream.shutdown().await?;

        match timeout(self.drain_timeout, tokio::io::copy(&mut stream, &mut tokio::io::sink())).await {
            Ok(Ok(discarded)) => trace!(discarded, "Probe peer closed"),
            Ok(Err(err)) => debug!(%err, "Error draining probe connection"),
            Err(_) => debug!("Probe peer did not close within {:?}", self.drain_timeout),
        }

        Ok(())
    }
}

impl fmt::Debug for ProbeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeHandler")
            .field("drain_timeout", &self.drain_timeout)
            .finish_non_exhaustive()
    }
}
