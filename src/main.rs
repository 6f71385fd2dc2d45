// src/main.rs
use anyhow::{Context, Result};
use kubeprobes::{config, Kubeprobes, ServerBuilder, StatefulProbe};
use std::path::Path;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kubeprobes=debug".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());

    let config = if Path::new(&config_path).exists() {
        info!("Loading configuration from: {}", config_path);
        config::load_config(&config_path).await?
    } else {
        warn!("{} not found, using default configuration", config_path);
        config::Config::default()
    };

    let alive = StatefulProbe::new();
    let ready = StatefulProbe::new();

    let mut builder = Kubeprobes::builder()
        .with_liveness_probe(alive.clone())
        .with_readiness_probe(ready.clone());
    if let Some(deadline) = config.probes.query_timeout() {
        builder = builder.with_query_timeout(deadline);
    }
    let probes = builder.build();

    let listener = TcpListener::bind(config.server.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen))?;
    alive.mark_as_up();
    ready.mark_as_up();

    let draining = ready.clone();
    ServerBuilder::new(listener)
        .with_handler(probes)
        .serve(async move {
            shutdown_signal().await;
            draining.mark_as_down();
        })
        .await?;

    Ok(())
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(%err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                warn!(%err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
