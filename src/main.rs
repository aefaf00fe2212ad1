// Main entry point for the imghost-server application.
// Parses configuration, connects storage, configures the Axum router, and
// starts the HTTP server.

mod config;
mod storage;
mod web;

use clap::Parser;
use config::AppConfig;
use std::sync::Arc;
use storage::PgImageStore;
use tokio::signal;
use tracing::Level;
use web::AppState;

#[tokio::main]
async fn main() {
    // Parse command line args and environment variables
    let config = AppConfig::parse();

    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    tracing::info!("Starting imghost-server...");

    if let Err(err) = tokio::fs::create_dir_all(&config.images_dir).await {
        tracing::error!(
            "FATAL: Failed to create images directory {:?}: {}",
            config.images_dir,
            err
        );
        std::process::exit(1);
    }

    // Connect the storage client and run the bundled schema migrations.
    let store = match PgImageStore::connect(&config.database_url()).await {
        Ok(store) => store,
        Err(err) => {
            tracing::error!("FATAL: Failed to initialize storage: {}", err);
            std::process::exit(1);
        }
    };

    let state = AppState {
        store: Arc::new(store),
        images_dir: config.images_dir.clone(),
        static_dir: config.static_dir.clone(),
    };

    let app = web::app::create_app(state);
    tracing::info!("Axum router configured.");

    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => {
            tracing::info!("Serving on http://{}", addr);
            listener
        }
        Err(err) => {
            tracing::error!("FATAL: Failed to bind server to {}: {}", addr, err);
            std::process::exit(1);
        }
    };

    // Run the server. The storage pool is dropped when this returns.
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server run error: {}", err);
    }

    tracing::info!("imghost-server has shut down.");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
