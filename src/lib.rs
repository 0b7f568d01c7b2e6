pub mod api;
pub mod config;
pub mod model;
pub mod seed;
pub mod store;
pub mod view;

use std::sync::Arc;

use anyhow::Context;
use log::{info, warn};
use tokio::net::TcpListener;

use crate::config::{AppConfig, StoreBackend};

// Export API types
pub use api::handlers;
pub use api::routes;

// Export all model types
pub use model::*;

// Export store types
pub use store::{AdminStore, MemoryStore, PostgresStore, Store, StoreError};

/// Initialize logging from `RUST_LOG`, defaulting to `info` and keeping
/// sqlx statement logs at `warn`.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("sqlx", log::LevelFilter::Warn)
        .try_init();
}

/// Load configuration, open the configured store and serve until a
/// shutdown signal arrives.
pub async fn run_server() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    info!(
        "Configuration loaded: server={} backend={:?}",
        config.server_address(),
        config.database.backend
    );

    let load_seed = std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true";

    match config.database.backend {
        StoreBackend::Postgres => {
            info!("Connecting to PostgreSQL...");
            let store = PostgresStore::new(&config.database_url(), &config.database).await?;

            if config.database.run_migrations {
                info!("Running database migrations...");
                store.migrate().await?;
            }
            if load_seed {
                seed::load_seed_data(&store).await?;
            }

            serve(Arc::new(store), &config).await
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; nothing is persisted");
            let store = MemoryStore::new();
            if load_seed {
                seed::load_seed_data(&store).await?;
            }

            serve(Arc::new(store), &config).await
        }
    }
}

pub async fn serve<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<()> {
    let app: axum::Router = routes::create_router().with_state(store);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Amur API running on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
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
                warn!("Failed to listen for SIGTERM: {}", e);
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
    info!("Shutdown signal received, draining connections");
}
