// src/server/probe.rs
use super::builder::ProbeServerBuilder;
use super::handler::ProbeHandler;
use std::fmt;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::time::{sleep, Duration};
use tracing::{info, warn};

const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// A bound probe listener, ready to serve.
pub struct ProbeServer {
    listener: TcpListener,
    handler: ProbeHandler,
    shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
}

impl fmt::Debug for ProbeServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeServer")
            .field("local_addr", &self.listener.local_addr().ok())
            .field("handler", &self.handler)
            .field("shutdown", &*self.shutdown_rx.borrow())
            .finish()
    }
}

/// Stops a [`ProbeServer`]. Cheap to clone, safe to call repeatedly.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        if !self.tx.send_replace(true) {
            info!("Probe server shutdown requested");
        }
    }

    pub fn is_shutdown(&self) -> bool {
        *self.tx.borrow()
    }
}

impl ProbeServer {
    pub fn builder(host: impl Into<String>, port: u16) -> ProbeServerBuilder {
        ProbeServerBuilder::new(host, port)
    }

    pub(crate) fn new(listener: TcpListener, handler: ProbeHandler) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            listener,
            handler,
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }

    /// Accept probes until a [`ShutdownHandle`] fires.
    pub async fn serve(self) {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Accept probes until a [`ShutdownHandle`] fires or `signal` completes.
    ///
    /// Each connection is answered on its own task. On return the listening
    /// socket is closed; connections accepted earlier finish on their own.
    pub async fn serve_with_shutdown<F>(self, signal: F)
    where
        F: Future<Output = ()>,
    {
        let ProbeServer {
            listener,
            handler,
            shutdown_tx,
            mut shutdown_rx,
        } = self;
        tokio::pin!(signal);

        match listener.local_addr() {
            Ok(addr) => info!("Probe server listening on {}", addr),
            Err(err) => warn!(%err, "Probe server listening on unknown address"),
        }

        loop {
            if *shutdown_rx.borrow_and_update() {
                break;
            }

            tokio::select! {
                biased;

                _ = &mut signal => break,
                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let handler = handler.clone();

                        // One task per probe connection.
                        tokio::spawn(async move {
                            if let Err(err) = handler.handle(stream).await {
                                warn!(%peer, %err, "probe connection error");
                            }
                        });
                    }
                    Err(err) => {
                        warn!(%err, "Failed to accept probe connection");
                        sleep(ACCEPT_ERROR_BACKOFF).await;
                    }
                },
            }
        }

        shutdown_tx.send_replace(true);
        drop(listener);
        info!("Probe server stopped");
    }
}
