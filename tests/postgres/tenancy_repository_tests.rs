//! Reference-data persistence and control scoping.

use super::helpers::{BoxError, with_seeded};
use compliance_tracker::tenancy::{
    domain::{Control, ControlId, Framework, FrameworkId, OrganizationId},
    ports::{TenancyRepository, TenancyRepositoryError},
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

#[rstest]
fn control_ownership_follows_the_framework(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    with_seeded(shared_test_cluster, |ctx| async move {
        assert!(
            ctx.tenancy
                .control_belongs_to_organization(ctx.organization_id, ctx.control_id)
                .await?
        );
        assert!(
            !ctx.tenancy
                .control_belongs_to_organization(OrganizationId::new(), ctx.control_id)
                .await?
        );
        assert!(
            !ctx.tenancy
                .control_belongs_to_organization(ctx.organization_id, ControlId::new())
                .await?
        );
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn duplicate_framework_name_is_rejected(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    with_seeded(shared_test_cluster, |ctx| async move {
        let duplicate = Framework::new(ctx.organization_id, "SOC 2", &DefaultClock)?;
        let result = ctx.tenancy.store_framework(&duplicate).await;

        assert!(matches!(
            result,
            Err(TenancyRepositoryError::DuplicateFrameworkName { .. })
        ));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn framework_for_unknown_organization_is_rejected(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    with_seeded(shared_test_cluster, |ctx| async move {
        let orphan = Framework::new(OrganizationId::new(), "ISO 27001", &DefaultClock)?;
        let result = ctx.tenancy.store_framework(&orphan).await;

        assert!(matches!(
            result,
            Err(TenancyRepositoryError::OrganizationNotFound(_))
        ));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn control_for_unknown_framework_is_rejected(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    with_seeded(shared_test_cluster, |ctx| async move {
        let missing = FrameworkId::new();
        let orphan = Control::new(missing, "AC-02", "Least privilege", &DefaultClock)?;
        let result = ctx.tenancy.store_control(&orphan).await;

        assert!(matches!(
            result,
            Err(TenancyRepositoryError::FrameworkNotFound(id)) if id == missing
        ));
        Ok::<(), BoxError>(())
    })
}
