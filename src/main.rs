use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use temperature_chart::backend::TemperatureClient;
use temperature_chart::common::AppState;
use temperature_chart::config::Config;
use temperature_chart::routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,temperature_chart=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting temperature-chart...");

    // Load configuration (fail-fast)
    let config = Config::from_env()?;
    tracing::info!(
        deployment = ?config.deployment,
        backend = %config.backend_base_url,
        display_zone = ?config.display_zone,
        host = %config.api_host,
        port = config.api_port,
        "Configuration loaded"
    );

    let client = TemperatureClient::new(&config)?;
    tracing::info!("Temperature API client initialized");

    let bind_address = config.bind_address();
    let state = AppState::new(config, Arc::new(client));

    // Initial load; a failure here is logged and the page can reload later
    if let Err(e) = state.store.reload().await {
        tracing::warn!(error = %e, "Initial series load failed");
    }

    let app = routes::build_router(state);

    // Start server with graceful shutdown
    tracing::info!(address = %bind_address, "Starting server");
    let listener = TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}
