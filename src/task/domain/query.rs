//! List-query parameters with pagination bounds.

use super::{TaskCategory, TaskStatus};
use crate::tenancy::domain::ControlId;

/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Clamped pagination window.
///
/// `limit` always lies in `1..=MAX_LIMIT`; `offset` is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: u32,
    offset: u64,
}

impl Pagination {
    /// Builds a window from raw caller input, clamping out-of-range values
    /// instead of rejecting them.
    #[must_use]
    pub fn clamped(limit: Option<i64>, offset: Option<i64>) -> Self {
        let raw_limit = limit.unwrap_or(i64::from(DEFAULT_LIMIT));
        let bounded_limit = raw_limit.clamp(1, i64::from(MAX_LIMIT));
        let raw_offset = offset.unwrap_or(0).max(0);
        Self {
            limit: u32::try_from(bounded_limit).unwrap_or(DEFAULT_LIMIT),
            offset: u64::try_from(raw_offset).unwrap_or(0),
        }
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns the number of matching rows to skip.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::clamped(None, None)
    }
}

/// Filters and pagination for listing an organization's tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    pagination: Pagination,
    status: Option<TaskStatus>,
    category: Option<TaskCategory>,
    control_id: Option<ControlId>,
    search: Option<String>,
}

impl TaskListQuery {
    /// Creates an unfiltered query over the given window.
    #[must_use]
    pub fn new(pagination: Pagination) -> Self {
        Self {
            pagination,
            ..Self::default()
        }
    }

    /// Restricts results to an exact status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to an exact category.
    #[must_use]
    pub const fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts results to tasks addressing one control.
    #[must_use]
    pub const fn with_control(mut self, control_id: ControlId) -> Self {
        self.control_id = Some(control_id);
        self
    }

    /// Restricts results to tasks whose name or description contains `term`,
    /// ignoring case. An empty term leaves the query unfiltered.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let value = term.into();
        self.search = (!value.is_empty()).then_some(value);
        self
    }

    /// Returns the pagination window.
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Returns the status filter.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the category filter.
    #[must_use]
    pub const fn category(&self) -> Option<TaskCategory> {
        self.category
    }

    /// Returns the control filter.
    #[must_use]
    pub const fn control_id(&self) -> Option<ControlId> {
        self.control_id
    }

    /// Returns the search term.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}
