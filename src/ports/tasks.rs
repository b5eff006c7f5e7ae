//! Repository port for task persistence, transitions, and the audit trail.

use crate::domain::{CategoryId, Task, TaskAuditEntry, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Also owns the append-only audit trail, because a status write and its
/// audit append must commit together.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// Owner and category liveness are re-checked inside the store's
    /// critical section, so an insert cannot race a concurrent deletion of
    /// either referenced record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the identifier already
    /// exists, [`TaskStoreError::OwnerNotLive`] when the owning user is
    /// missing or deleted, or [`TaskStoreError::CategoryNotLive`] when a
    /// referenced category is missing or deleted.
    async fn insert_task(&self, task: &Task) -> TaskStoreResult<()>;

    /// Finds a live task by identifier.
    ///
    /// Returns `None` when the task does not exist or has been
    /// soft-deleted.
    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Lists live tasks, optionally restricted to one owner.
    ///
    /// No ordering is guaranteed; callers sort as needed.
    async fn list_tasks(&self, owner: Option<UserId>) -> TaskStoreResult<Vec<Task>>;

    /// Persists a transitioned task and appends its audit entry atomically.
    ///
    /// The incoming task carries the version it was read at; the store
    /// rejects the write when the stored version has moved on, and commits
    /// the status write and the audit append in one critical section.
    /// Returns the stored snapshot with the advanced version.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task is missing or
    /// soft-deleted, or [`TaskStoreError::VersionConflict`] when another
    /// writer got there first (callers re-read and retry).
    async fn apply_transition(
        &self,
        task: &Task,
        entry: &TaskAuditEntry,
    ) -> TaskStoreResult<Task>;

    /// Returns the audit trail for a task, ordered by change time.
    ///
    /// The trail of a soft-deleted task remains readable.
    async fn audit_trail(&self, task_id: TaskId) -> TaskStoreResult<Vec<TaskAuditEntry>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The owning user is missing or soft-deleted.
    #[error("task owner is not live: {0}")]
    OwnerNotLive(UserId),

    /// The referenced category is missing or soft-deleted.
    #[error("task category is not live: {0}")]
    CategoryNotLive(CategoryId),

    /// The task was not found among live records.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task changed since it was read.
    #[error("stale write for task {0}, version moved on")]
    VersionConflict(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
