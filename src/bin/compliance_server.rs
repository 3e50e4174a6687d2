//! HTTP server for the compliance task tracker.
//!
//! Reads configuration from the environment (and a `.env` file when
//! present), prepares the database, then serves the REST API until SIGINT
//! or SIGTERM arrives.

use compliance_tracker::{
    config::ServerConfig,
    http::{AppState, PostgresBackend, router},
    persistence::{build_pool, run_migrations},
    task::adapters::postgres::PostgresTaskRepository,
    telemetry::init_tracing,
    tenancy::adapters::postgres::PostgresTenancyRepository,
};
use mockable::DefaultClock;
use std::sync::Arc;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let dotenv = dotenvy::dotenv();
    let config = ServerConfig::from_env()?;
    init_tracing(config.log_json())?;
    if let Err(err) = dotenv {
        if !err.not_found() {
            warn!(error = %err, "ignoring unreadable .env file");
        }
    }

    let pool = build_pool(config.database_url(), config.pool_size())?;
    if config.run_migrations() {
        run_migrations(&pool).await?;
    }

    let state = AppState::<PostgresBackend>::new(
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::new(PostgresTenancyRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    );
    let app = router(state);

    let address = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!(%address, "compliance server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    drop(pool);
    info!("server shutdown complete");
    Ok(())
}

/// Resolves once SIGINT or, on Unix, SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
