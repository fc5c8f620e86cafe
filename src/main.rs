// src/main.rs
use anyhow::{Context, Result};
use health_probe::{
    config::{self, Config},
    health::CheckerDirectory,
    server::ProbeServerBuilder,
};
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("health_probe=debug".parse()?),
        )
        .init();

    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(config_path) => {
            info!("Loading configuration from: {}", config_path);
            config::load_config(&config_path).await?
        }
        None => {
            info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let directory = Arc::new(CheckerDirectory::new());
    let checker = directory.get_checker(config.server.checker.as_deref());

    checker.set_healthy("main", Some("started"));
    for component in &config.components {
        checker.set_healthy(component, None);
    }

    let server = ProbeServerBuilder::from_config(&config.server)
        .with_checker(checker)
        .bind()
        .await
        .context("Failed to start probe server")?;

    server.serve_with_shutdown(shutdown_signal()).await;

    Ok(())
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
