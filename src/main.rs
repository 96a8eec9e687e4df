use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use horarios_api::config::Settings;
use horarios_api::db::{DbPool, StationCatalog};
use horarios_api::routes;
use horarios_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "horarios_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    tracing::info!("Starting schedule API server");

    // Load configuration
    let config = Settings::load().context("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Invalid configuration")?;
    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.name,
        mode = ?config.run_mode,
        "Configuration loaded"
    );

    // Prepare the lazy connection pool and probe it once. An unreachable
    // store is logged, not fatal: requests fail individually until the
    // database comes back.
    let db = DbPool::connect_lazy(&config.database);
    match db.health_check().await {
        Ok(()) => tracing::info!("Database connection established"),
        Err(e) => tracing::error!(error = %e, "Database unreachable at startup"),
    }

    // Load the station allow-list from information_schema
    let catalog = StationCatalog::new(db.clone());
    match catalog.preload().await {
        Ok(columns) => tracing::info!(columns, "Station catalog loaded"),
        Err(e) => tracing::warn!(
            error = %e,
            "Station catalog preload failed; columns will load on demand"
        ),
    }

    // Create application state and router
    let state = AppState::new(db.clone(), catalog, config.clone());
    let app = routes::create_router(state);

    // Start server
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .context("Invalid server host")?,
        config.server.port,
    ));
    tracing::info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Schedule API server stopped");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Initiating graceful shutdown");
}
