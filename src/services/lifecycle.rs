//! Service layer for task creation and audited status transitions.
//!
//! This is the only write path into task records. Going through the
//! service keeps the lifecycle invariants (completion timestamps, audit
//! entries, update stamps) without relying on storage-side enforcement.

use crate::domain::{
    CategoryId, Task, TaskAuditEntry, TaskDomainError, TaskId, TaskPriority, TaskStatus,
    TaskTitle, UserId,
};
use crate::ports::{
    CategoryRepository, CategoryStoreError, TaskRepository, TaskStoreError, UserRepository,
    UserStoreError,
};
use chrono::TimeDelta;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    owner_id: UserId,
    title: String,
    category_id: Option<CategoryId>,
    description: Option<String>,
    priority: Option<TaskPriority>,
    due_in_days: Option<i64>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(owner_id: UserId, title: impl Into<String>) -> Self {
        Self {
            owner_id,
            title: title.into(),
            category_id: None,
            description: None,
            priority: None,
            due_in_days: None,
        }
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the priority from a free-form label.
    ///
    /// Unrecognised labels fall back to [`TaskPriority::Medium`] rather
    /// than failing the request.
    #[must_use]
    pub fn with_priority_label(mut self, label: &str) -> Self {
        self.priority = Some(TaskPriority::from_label(label));
        self
    }

    /// Sets the due date as a day offset from creation time.
    ///
    /// An offset of zero makes the task due immediately; omitting the
    /// offset leaves the task without a due date. Offsets that land
    /// outside the representable timestamp range fail validation at
    /// creation time.
    #[must_use]
    pub const fn due_in_days(mut self, days: i64) -> Self {
        self.due_in_days = Some(days);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),
    /// The owning user is missing, deleted, or inactive.
    #[error("no active user for id {0}")]
    UserNotFound(UserId),
    /// The category is missing, deleted, or not usable by the owner.
    #[error("no usable category for id {0}")]
    CategoryNotFound(CategoryId),
    /// The task is missing or deleted.
    #[error("no live task for id {0}")]
    TaskNotFound(TaskId),
    /// User store operation failed.
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    /// Category store operation failed.
    #[error(transparent)]
    CategoryStore(#[from] CategoryStoreError),
    /// Task store operation failed.
    #[error(transparent)]
    TaskStore(#[from] TaskStoreError),
}

/// Result type for task lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<S, C>
where
    S: UserRepository + CategoryRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TaskLifecycleService<S, C>
where
    S: UserRepository + CategoryRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a task in [`TaskStatus::Pending`] and returns its
    /// identifier.
    ///
    /// Creation is not a transition, so no audit entry is written.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Validation`] for an empty title or an
    /// unrepresentable due-date offset, [`LifecycleError::UserNotFound`]
    /// when the owner is not a live, active user, and
    /// [`LifecycleError::CategoryNotFound`] when the requested category is
    /// not live, or is owned by someone else.
    pub async fn create_task(&self, request: CreateTaskRequest) -> LifecycleResult<TaskId> {
        let title = TaskTitle::new(request.title)?;

        let owner = self
            .store
            .find_user(request.owner_id)
            .await?
            .filter(|user| user.is_active())
            .ok_or(LifecycleError::UserNotFound(request.owner_id))?;

        if let Some(category_id) = request.category_id {
            let category = self
                .store
                .find_category(category_id)
                .await?
                .ok_or(LifecycleError::CategoryNotFound(category_id))?;
            if !category.is_available_to(owner.id()) {
                return Err(LifecycleError::CategoryNotFound(category_id));
            }
        }

        let mut task = Task::new(owner.id(), title, &*self.clock)
            .with_priority(request.priority.unwrap_or_default());
        if let Some(category_id) = request.category_id {
            task = task.with_category(category_id);
        }
        if let Some(description) = request.description {
            task = task.with_description(description);
        }
        if let Some(days) = request.due_in_days {
            let offset =
                TimeDelta::try_days(days).ok_or(TaskDomainError::DueDateOutOfRange(days))?;
            let due_at = task
                .created_at()
                .checked_add_signed(offset)
                .ok_or(TaskDomainError::DueDateOutOfRange(days))?;
            task = task.with_due_at(due_at);
        }

        self.store.insert_task(&task).await?;
        Ok(task.id())
    }

    /// Moves a task to `new_status` and returns the stored snapshot.
    ///
    /// Requesting the current status is a no-op that returns the unchanged
    /// snapshot. A real change stamps or clears `completed_at`, touches
    /// `updated_at`, and appends exactly one audit entry atomically with
    /// the status write. Lost races against concurrent transitions on the
    /// same task are retried from a fresh read.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`] when the task is missing or
    /// soft-deleted.
    pub async fn transition_status(
        &self,
        task_id: TaskId,
        new_status: TaskStatus,
    ) -> LifecycleResult<Task> {
        loop {
            let mut task = self
                .store
                .find_task(task_id)
                .await?
                .ok_or(LifecycleError::TaskNotFound(task_id))?;

            let Some(change) = task.transition_to(new_status, &*self.clock) else {
                return Ok(task);
            };
            let entry = TaskAuditEntry::new(task.id(), change, task.updated_at());

            match self.store.apply_transition(&task, &entry).await {
                Ok(committed) => return Ok(committed),
                Err(TaskStoreError::VersionConflict(_)) => {}
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Returns the live task snapshot for `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`] when the task is missing or
    /// soft-deleted.
    pub async fn find_task(&self, task_id: TaskId) -> LifecycleResult<Task> {
        self.store
            .find_task(task_id)
            .await?
            .ok_or(LifecycleError::TaskNotFound(task_id))
    }

    /// Returns the audit trail for a task, oldest change first.
    ///
    /// The trail stays readable after the task is soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskStore`] when the trail cannot be read.
    pub async fn audit_trail(&self, task_id: TaskId) -> LifecycleResult<Vec<TaskAuditEntry>> {
        Ok(self.store.audit_trail(task_id).await?)
    }
}
