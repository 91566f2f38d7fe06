use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use demo_api::app::{app, AppState};
use demo_api::database::DatabaseManager;
use demo_api::services::DemoService;

#[derive(Parser)]
#[command(name = "demo-api")]
#[command(about = "Player score CRUD service over MongoDB")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides DEMO_API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, default_value = "0.0.0.0", help = "Address to bind")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up MONGO_HOST, MONGO_DATABASE, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("demo_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = demo_api::config::config().clone();
    if let Some(port) = args.port {
        config.api.port = port;
    }
    tracing::info!("Starting Demo API in {:?} mode", config.environment);

    let manager = DatabaseManager::connect(&config.database)
        .await
        .context("failed to create database client")?;
    if let Err(e) = manager.health_check().await {
        tracing::warn!("Database not reachable at startup: {}", e);
    }

    let bind_addr = format!("{}:{}", args.bind, config.api.port);
    let state = AppState::new(config, Arc::new(DemoService::new(manager.clone())));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Demo API listening on http://{}", bind_addr);

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    manager.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutting down");
}
