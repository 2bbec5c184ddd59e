use anyhow::Context;
use sidecrop::config::ServiceConfig;
use sidecrop::server::{AppState, router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sidecrop=info")),
        )
        .init();

    let config = ServiceConfig::from_env();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    if !config.allowed_hosts.is_empty() {
        tracing::info!(hosts = ?config.allowed_hosts, "host allow-list active");
    }

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "image cropper listening");

    axum::serve(listener, router(AppState::new(config)))
        .await
        .context("server error")?;
    Ok(())
}
