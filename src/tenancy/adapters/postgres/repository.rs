//! `PostgreSQL` repository implementation for tenant reference data.

use super::{
    models::{NewControlRow, NewFrameworkRow, NewOrganizationRow},
    schema::{controls, frameworks, organizations},
};
use crate::tenancy::{
    domain::{Control, ControlId, Framework, Organization, OrganizationId},
    ports::{TenancyRepository, TenancyRepositoryError, TenancyRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by tenancy adapters.
pub type TenancyPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed tenancy repository.
#[derive(Debug, Clone)]
pub struct PostgresTenancyRepository {
    pool: TenancyPgPool,
}

impl PostgresTenancyRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TenancyPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TenancyRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TenancyRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TenancyRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TenancyRepositoryError::persistence)?
    }
}

#[async_trait]
impl TenancyRepository for PostgresTenancyRepository {
    async fn store_organization(
        &self,
        organization: &Organization,
    ) -> TenancyRepositoryResult<()> {
        let row = NewOrganizationRow {
            id: organization.id().into_inner(),
            name: organization.name().to_owned(),
            created_at: organization.created_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(organizations::table)
                .values(&row)
                .execute(connection)
                .map_err(TenancyRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn store_framework(&self, framework: &Framework) -> TenancyRepositoryResult<()> {
        let organization_id = framework.organization_id();
        let name = framework.name().to_owned();
        let row = NewFrameworkRow {
            id: framework.id().into_inner(),
            organization_id: organization_id.into_inner(),
            name: name.clone(),
            created_at: framework.created_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(frameworks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TenancyRepositoryError::DuplicateFrameworkName {
                            organization_id,
                            name: name.clone(),
                        }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TenancyRepositoryError::OrganizationNotFound(organization_id)
                    }
                    _ => TenancyRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn store_control(&self, control: &Control) -> TenancyRepositoryResult<()> {
        let framework_id = control.framework_id();
        let code = control.code().clone();
        let row = NewControlRow {
            id: control.id().into_inner(),
            framework_id: framework_id.into_inner(),
            code: code.as_str().to_owned(),
            title: control.title().to_owned(),
            created_at: control.created_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(controls::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TenancyRepositoryError::DuplicateControlCode {
                            framework_id,
                            code: code.clone(),
                        }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TenancyRepositoryError::FrameworkNotFound(framework_id)
                    }
                    _ => TenancyRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn control_belongs_to_organization(
        &self,
        organization_id: OrganizationId,
        control_id: ControlId,
    ) -> TenancyRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                controls::table
                    .inner_join(frameworks::table)
                    .filter(controls::id.eq(control_id.into_inner()))
                    .filter(frameworks::organization_id.eq(organization_id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(TenancyRepositoryError::persistence)
        })
        .await
    }
}
