//! Route handlers. Each one maps parsed DTOs onto a service call.

use super::{
    ApiError, AppState, Backend,
    dto::{
        CreateEvidenceBody, CreateTaskBody, EvidencePath, EvidenceResponse, ListTasksParams,
        ListTasksResponse, OrganizationPath, PatchTaskBody, TaskDetailsResponse, TaskPath,
        TaskResponse,
    },
    extract::{ValidJson, ValidPath, ValidQuery},
};
use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(super) async fn fallback() -> ApiError {
    ApiError::NotFound("Not Found")
}

pub(super) async fn create_task<B: Backend>(
    State(state): State<AppState<B>>,
    ValidPath(path): ValidPath<OrganizationPath>,
    ValidJson(body): ValidJson<CreateTaskBody>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let task = state.tasks.create(path.organization(), body.into()).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

pub(super) async fn list_tasks<B: Backend>(
    State(state): State<AppState<B>>,
    ValidPath(path): ValidPath<OrganizationPath>,
    ValidQuery(params): ValidQuery<ListTasksParams>,
) -> Result<Json<ListTasksResponse>, ApiError> {
    let listing = state.tasks.list(path.organization(), &params.into()).await?;
    Ok(Json(ListTasksResponse::from(&listing)))
}

pub(super) async fn get_task<B: Backend>(
    State(state): State<AppState<B>>,
    ValidPath(path): ValidPath<TaskPath>,
) -> Result<Json<TaskDetailsResponse>, ApiError> {
    let (organization_id, task_id) = path.ids();
    let details = state.tasks.get(organization_id, task_id).await?;
    Ok(Json(TaskDetailsResponse::from(&details)))
}

pub(super) async fn patch_task<B: Backend>(
    State(state): State<AppState<B>>,
    ValidPath(path): ValidPath<TaskPath>,
    ValidJson(body): ValidJson<PatchTaskBody>,
) -> Result<Json<TaskResponse>, ApiError> {
    let (organization_id, task_id) = path.ids();
    let task = state
        .tasks
        .patch(organization_id, task_id, body.into())
        .await?;
    Ok(Json(TaskResponse::from(&task)))
}

pub(super) async fn delete_task<B: Backend>(
    State(state): State<AppState<B>>,
    ValidPath(path): ValidPath<TaskPath>,
) -> Result<StatusCode, ApiError> {
    let (organization_id, task_id) = path.ids();
    state.tasks.delete(organization_id, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn add_evidence<B: Backend>(
    State(state): State<AppState<B>>,
    ValidPath(path): ValidPath<TaskPath>,
    ValidJson(body): ValidJson<CreateEvidenceBody>,
) -> Result<(StatusCode, Json<EvidenceResponse>), ApiError> {
    let (organization_id, task_id) = path.ids();
    let item = state
        .evidence
        .add(organization_id, task_id, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(EvidenceResponse::from(&item))))
}

pub(super) async fn delete_evidence<B: Backend>(
    State(state): State<AppState<B>>,
    ValidPath(path): ValidPath<EvidencePath>,
) -> Result<StatusCode, ApiError> {
    let (organization_id, task_id, evidence_id) = path.ids();
    state
        .evidence
        .delete(organization_id, task_id, evidence_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
