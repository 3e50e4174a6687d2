//! Connection pooling and schema migrations for the `PostgreSQL` adapters.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;
use tracing::info;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Connection pool shared by the task and tenancy adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The pool could not be created or a connection could not be checked
    /// out.
    #[error("database pool error: {0}")]
    Pool(#[from] PoolError),
    /// A migration failed to apply.
    #[error("migration failed: {0}")]
    Migration(Box<dyn std::error::Error + Send + Sync>),
    /// Blocking setup work panicked or was cancelled.
    #[error("database setup task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds a connection pool with at most `max_size` connections.
///
/// # Errors
///
/// Returns [`PersistenceError::Pool`] when the initial connections cannot
/// be established.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, PersistenceError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().max_size(max_size).build(manager)?;
    Ok(pool)
}

/// Applies every pending migration on one pooled connection.
///
/// # Errors
///
/// Returns [`PersistenceError`] when no connection is available or a
/// migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), PersistenceError> {
    let pool = pool.clone();
    let applied = tokio::task::spawn_blocking(move || -> Result<usize, PersistenceError> {
        let mut connection = pool.get()?;
        let versions = connection
            .run_pending_migrations(MIGRATIONS)
            .map_err(PersistenceError::Migration)?;
        Ok(versions.len())
    })
    .await??;
    info!(applied, "database migrations complete");
    Ok(())
}
