//! In-memory repository for task and evidence tests.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Evidence, EvidenceId, Task, TaskChanges, TaskId, TaskListQuery},
    ports::{
        EvidenceRepository, TaskPage, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
    },
};
use crate::tenancy::domain::OrganizationId;

/// Thread-safe in-memory task and evidence repository.
///
/// Insertion order is recorded so that rows created within the same clock
/// tick still sort deterministically.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug)]
struct Sequenced<T> {
    value: T,
    sequence: u64,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Sequenced<Task>>,
    evidence: HashMap<EvidenceId, Sequenced<Evidence>>,
    next_sequence: u64,
}

impl InMemoryTaskState {
    fn next_sequence(&mut self) -> u64 {
        self.next_sequence += 1;
        self.next_sequence
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn contains_ignoring_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_query(task: &Task, organization_id: OrganizationId, query: &TaskListQuery) -> bool {
    if task.organization_id() != organization_id {
        return false;
    }
    if query.status().is_some_and(|status| task.status() != status) {
        return false;
    }
    if query
        .category()
        .is_some_and(|category| task.category() != category)
    {
        return false;
    }
    if query
        .control_id()
        .is_some_and(|control_id| task.control_id() != control_id)
    {
        return false;
    }
    query.search().is_none_or(|term| {
        let needle = term.to_lowercase();
        contains_ignoring_case(task.name().as_str(), &needle)
            || task
                .description()
                .is_some_and(|description| contains_ignoring_case(description, &needle))
    })
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        let sequence = state.next_sequence();
        state.tasks.insert(
            task.id(),
            Sequenced {
                value: task.clone(),
                sequence,
            },
        );
        Ok(())
    }

    async fn update(
        &self,
        organization_id: OrganizationId,
        id: TaskId,
        changes: &TaskChanges,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let stored = state
            .tasks
            .get_mut(&id)
            .filter(|stored| stored.value.organization_id() == organization_id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        stored.value.apply_changes(changes);
        Ok(stored.value.clone())
    }

    async fn find_in_organization(
        &self,
        organization_id: OrganizationId,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .tasks
            .get(&id)
            .map(|stored| &stored.value)
            .filter(|task| task.organization_id() == organization_id)
            .cloned())
    }

    async fn list(
        &self,
        organization_id: OrganizationId,
        query: &TaskListQuery,
    ) -> TaskRepositoryResult<TaskPage> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut matching: Vec<&Sequenced<Task>> = state
            .tasks
            .values()
            .filter(|stored| matches_query(&stored.value, organization_id, query))
            .collect();
        matching.sort_by_key(|stored| Reverse((stored.value.created_at(), stored.sequence)));

        let total = u64::try_from(matching.len()).map_err(TaskRepositoryError::persistence)?;
        let pagination = query.pagination();
        let skip = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(pagination.limit()).map_err(TaskRepositoryError::persistence)?;
        let items = matching
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|stored| stored.value.clone())
            .collect();
        Ok(TaskPage { total, items })
    }

    async fn delete_in_organization(
        &self,
        organization_id: OrganizationId,
        id: TaskId,
    ) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let owned = state
            .tasks
            .get(&id)
            .is_some_and(|stored| stored.value.organization_id() == organization_id);
        if !owned {
            return Ok(false);
        }
        state.tasks.remove(&id);
        state.evidence.retain(|_, stored| stored.value.task_id() != id);
        Ok(true)
    }
}

#[async_trait]
impl EvidenceRepository for InMemoryTaskRepository {
    async fn store_evidence(&self, evidence: &Evidence) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.tasks.contains_key(&evidence.task_id()) {
            return Err(TaskRepositoryError::NotFound(evidence.task_id()));
        }
        if state.evidence.contains_key(&evidence.id()) {
            return Err(TaskRepositoryError::DuplicateEvidence(evidence.id()));
        }
        let sequence = state.next_sequence();
        state.evidence.insert(
            evidence.id(),
            Sequenced {
                value: evidence.clone(),
                sequence,
            },
        );
        Ok(())
    }

    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Evidence>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut items: Vec<&Sequenced<Evidence>> = state
            .evidence
            .values()
            .filter(|stored| stored.value.task_id() == task_id)
            .collect();
        items.sort_by_key(|stored| (stored.value.created_at(), stored.sequence));
        Ok(items.into_iter().map(|stored| stored.value.clone()).collect())
    }

    async fn find_in_scope(
        &self,
        organization_id: OrganizationId,
        task_id: TaskId,
        evidence_id: EvidenceId,
    ) -> TaskRepositoryResult<Option<Evidence>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let found = state
            .evidence
            .get(&evidence_id)
            .map(|stored| &stored.value)
            .filter(|evidence| evidence.task_id() == task_id)
            .filter(|evidence| {
                state
                    .tasks
                    .get(&evidence.task_id())
                    .is_some_and(|task| task.value.organization_id() == organization_id)
            })
            .cloned();
        Ok(found)
    }

    async fn delete_evidence(&self, evidence_id: EvidenceId) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        Ok(state.evidence.remove(&evidence_id).is_some())
    }
}
