//! Wire-format request and response bodies.
//!
//! Field names are camelCase. Timestamps are RFC 3339 in UTC with
//! millisecond precision, for example `2024-05-01T09:30:00.000Z`.

use crate::task::{
    domain::{
        Evidence, EvidenceId, EvidenceType, Pagination, Task, TaskCategory, TaskId,
        TaskListQuery, TaskPatch, TaskStatus,
    },
    services::{CreateEvidenceRequest, CreateTaskRequest, TaskDetails, TaskListing},
};
use crate::tenancy::domain::{ControlId, OrganizationId};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

fn serialize_timestamp<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Path parameters for organization-level routes.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPath {
    /// Calling organization.
    pub organization_id: Uuid,
}

/// Path parameters for task-level routes.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPath {
    /// Calling organization.
    pub organization_id: Uuid,
    /// Addressed task.
    pub task_id: Uuid,
}

/// Path parameters for evidence-level routes.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidencePath {
    /// Calling organization.
    pub organization_id: Uuid,
    /// Owning task.
    pub task_id: Uuid,
    /// Addressed evidence item.
    pub evidence_id: Uuid,
}

impl OrganizationPath {
    /// Returns the typed organization identifier.
    #[must_use]
    pub const fn organization(self) -> OrganizationId {
        OrganizationId::from_uuid(self.organization_id)
    }
}

impl TaskPath {
    /// Returns the typed organization and task identifiers.
    #[must_use]
    pub const fn ids(self) -> (OrganizationId, TaskId) {
        (
            OrganizationId::from_uuid(self.organization_id),
            TaskId::from_uuid(self.task_id),
        )
    }
}

impl EvidencePath {
    /// Returns the typed organization, task and evidence identifiers.
    #[must_use]
    pub const fn ids(self) -> (OrganizationId, TaskId, EvidenceId) {
        (
            OrganizationId::from_uuid(self.organization_id),
            TaskId::from_uuid(self.task_id),
            EvidenceId::from_uuid(self.evidence_id),
        )
    }
}

/// Body of `POST .../tasks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTaskBody {
    /// Control the task addresses.
    pub control_id: Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Task category.
    pub category: TaskCategory,
    /// Initial status, `OPEN` when absent.
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

impl From<CreateTaskBody> for CreateTaskRequest {
    fn from(body: CreateTaskBody) -> Self {
        let mut request = Self::new(
            ControlId::from_uuid(body.control_id),
            body.name,
            body.category,
        );
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        if let Some(status) = body.status {
            request = request.with_status(status);
        }
        request
    }
}

/// Body of `PATCH .../tasks/{taskId}`.
///
/// `description: null` clears the description; omitting it leaves it as is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatchTaskBody {
    /// New control.
    #[serde(default)]
    pub control_id: Option<Uuid>,
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description or `null`.
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub description: Option<Option<String>>,
    /// New category.
    #[serde(default)]
    pub category: Option<TaskCategory>,
    /// New status.
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

impl From<PatchTaskBody> for TaskPatch {
    fn from(body: PatchTaskBody) -> Self {
        Self {
            control_id: body.control_id.map(ControlId::from_uuid),
            name: body.name,
            description: body.description,
            category: body.category,
            status: body.status,
        }
    }
}

/// Query string of `GET .../tasks`.
///
/// Out-of-range `limit` and `offset` values are clamped rather than
/// rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksParams {
    /// Page size, clamped to `1..=100`.
    pub limit: Option<i64>,
    /// Rows to skip, clamped to zero or more.
    pub offset: Option<i64>,
    /// Exact status filter.
    pub status: Option<TaskStatus>,
    /// Exact category filter.
    pub category: Option<TaskCategory>,
    /// Exact control filter.
    pub control_id: Option<Uuid>,
    /// Case-insensitive substring over name and description.
    pub search: Option<String>,
}

impl From<ListTasksParams> for TaskListQuery {
    fn from(params: ListTasksParams) -> Self {
        let mut query = Self::new(Pagination::clamped(params.limit, params.offset));
        if let Some(status) = params.status {
            query = query.with_status(status);
        }
        if let Some(category) = params.category {
            query = query.with_category(category);
        }
        if let Some(control_id) = params.control_id {
            query = query.with_control(ControlId::from_uuid(control_id));
        }
        if let Some(search) = params.search {
            query = query.with_search(search);
        }
        query
    }
}

/// Body of `POST .../evidence`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateEvidenceBody {
    /// Kind of artifact.
    #[serde(rename = "type")]
    pub evidence_type: EvidenceType,
    /// Optional note.
    #[serde(default)]
    pub note: Option<String>,
}

impl From<CreateEvidenceBody> for CreateEvidenceRequest {
    fn from(body: CreateEvidenceBody) -> Self {
        let request = Self::new(body.evidence_type);
        match body.note {
            Some(note) => request.with_note(note),
            None => request,
        }
    }
}

/// A task as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    id: Uuid,
    organization_id: Uuid,
    control_id: Uuid,
    name: String,
    description: Option<String>,
    category: TaskCategory,
    status: TaskStatus,
    #[serde(serialize_with = "serialize_timestamp")]
    created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            organization_id: task.organization_id().into_inner(),
            control_id: task.control_id().into_inner(),
            name: task.name().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            category: task.category(),
            status: task.status(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// An evidence item as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceResponse {
    id: Uuid,
    task_id: Uuid,
    #[serde(rename = "type")]
    evidence_type: EvidenceType,
    note: Option<String>,
    #[serde(serialize_with = "serialize_timestamp")]
    created_at: DateTime<Utc>,
}

impl From<&Evidence> for EvidenceResponse {
    fn from(item: &Evidence) -> Self {
        Self {
            id: item.id().into_inner(),
            task_id: item.task_id().into_inner(),
            evidence_type: item.evidence_type(),
            note: item.note().map(str::to_owned),
            created_at: item.created_at(),
        }
    }
}

/// A task with its evidence, ordered oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDetailsResponse {
    #[serde(flatten)]
    task: TaskResponse,
    evidence: Vec<EvidenceResponse>,
}

impl From<&TaskDetails> for TaskDetailsResponse {
    fn from(details: &TaskDetails) -> Self {
        Self {
            task: TaskResponse::from(&details.task),
            evidence: details.evidence.iter().map(EvidenceResponse::from).collect(),
        }
    }
}

/// One page of tasks.
#[derive(Debug, Clone, Serialize)]
pub struct ListTasksResponse {
    total: u64,
    limit: u32,
    offset: u64,
    items: Vec<TaskResponse>,
}

impl From<&TaskListing> for ListTasksResponse {
    fn from(listing: &TaskListing) -> Self {
        Self {
            total: listing.total,
            limit: listing.limit,
            offset: listing.offset,
            items: listing.items.iter().map(TaskResponse::from).collect(),
        }
    }
}
