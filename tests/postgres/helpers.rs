//! Shared helpers for `PostgreSQL` integration tests.

use compliance_tracker::{
    persistence::{MIGRATIONS, PgPool},
    task::adapters::postgres::PostgresTaskRepository,
    tenancy::{
        adapters::postgres::PostgresTenancyRepository,
        domain::{ControlId, OrganizationId},
        services::{RegisterControlRequest, TenancyService},
    },
};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::MigrationHarness;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Boxed error type for fallible helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Template database carrying the migrated schema.
pub const TEMPLATE_DB: &str = "compliance_test_template";

/// Creates a runtime for driving the async repositories from sync tests.
///
/// # Errors
///
/// Returns an error when the runtime cannot be built.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Ensures the template database exists with every migration applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut connection = PgConnection::establish(&url)
                .map_err(|e| eyre::eyre!("{e}"))?;
            connection
                .run_pending_migrations(MIGRATIONS)
                .map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Database cloned from the template, dropped when the value goes out of
/// scope.
pub struct TestDatabase {
    cluster: &'static TestCluster,
    name: String,
}

impl TestDatabase {
    /// Creates a fresh database from the migrated template.
    ///
    /// # Errors
    ///
    /// Returns an error when the template or the copy cannot be created.
    pub fn from_template(cluster: &'static TestCluster) -> Result<Self, BoxError> {
        ensure_template(cluster)?;
        let name = format!("test_{}", Uuid::new_v4().simple());
        cluster
            .create_database_from_template(name.as_str(), TEMPLATE_DB)
            .map_err(|e| Box::new(e) as BoxError)?;
        Ok(Self { cluster, name })
    }

    /// Builds a connection pool for this database.
    ///
    /// # Errors
    ///
    /// Returns an error when the pool cannot connect.
    pub fn pool(&self) -> Result<PgPool, BoxError> {
        let url = self.cluster.connection().database_url(&self.name);
        Ok(Pool::builder()
            .max_size(2)
            .build(ConnectionManager::<PgConnection>::new(url))?)
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        let _dropped = self.cluster.drop_database(self.name.as_str());
    }
}

/// Repositories over one test database, plus a seeded tenant.
pub struct Seeded {
    /// Task repository under test.
    pub tasks: PostgresTaskRepository,
    /// Tenancy repository under test.
    pub tenancy: Arc<PostgresTenancyRepository>,
    /// Seeded organization.
    pub organization_id: OrganizationId,
    /// Control owned by the seeded organization.
    pub control_id: ControlId,
}

async fn seed(pool: PgPool) -> Result<Seeded, BoxError> {
    let tenancy = Arc::new(PostgresTenancyRepository::new(pool.clone()));
    let service = TenancyService::new(Arc::clone(&tenancy), Arc::new(DefaultClock));
    let organization = service.register_organization("Acme Corp").await?;
    let framework = service
        .register_framework(organization.id(), "SOC 2")
        .await?;
    let control = service
        .register_control(RegisterControlRequest::new(
            framework.id(),
            "AC-01",
            "Access Control Policy",
        ))
        .await?;

    Ok(Seeded {
        tasks: PostgresTaskRepository::new(pool),
        tenancy,
        organization_id: organization.id(),
        control_id: control.id(),
    })
}

/// Runs `test` against a freshly seeded database cloned from the template.
///
/// The database is dropped after the runtime and every pool handle are gone.
///
/// # Errors
///
/// Returns the first setup or test error.
pub fn with_seeded<F, Fut>(cluster: &'static TestCluster, test: F) -> Result<(), BoxError>
where
    F: FnOnce(Seeded) -> Fut,
    Fut: Future<Output = Result<(), BoxError>>,
{
    let database = TestDatabase::from_template(cluster)?;
    let pool = database.pool()?;
    let runtime = test_runtime()?;
    let outcome = runtime.block_on(async move { test(seed(pool).await?).await });
    drop(runtime);
    drop(database);
    outcome
}
