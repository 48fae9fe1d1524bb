//! Process entry point: load `.env`, set up structured logging, build
//! and start the application, then serve HTTP until `ctrl_c`.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::prelude::*;

use stockcache::application::Application;
use stockcache::config::Config;
use stockcache::interfaces::http::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("stockcache {} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(mode = ?config.mode, http_port = config.http_port, "configuration loaded");

    let app = Application::build(config.clone()).await?;
    let handle = app.start();

    let state = Arc::new(AppState {
        query_bridge: handle.query_bridge,
        readiness: handle.readiness,
        metrics: handle.metrics,
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.http_port)).await?;
    info!(port = config.http_port, "http server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received ctrl_c, shutting down"),
        Err(err) => tracing::error!(error = %err, "unable to listen for shutdown signal"),
    }
}
