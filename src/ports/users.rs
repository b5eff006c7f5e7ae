//! Repository port for user persistence and cascaded deletion.

use crate::domain::{EmailAddress, User, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserStoreResult<T> = Result<T, UserStoreError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserStoreError::DuplicateUser`] when the identifier already
    /// exists or [`UserStoreError::DuplicateEmail`] when another live user
    /// holds the same email address.
    async fn insert_user(&self, user: &User) -> UserStoreResult<()>;

    /// Finds a live user by identifier.
    ///
    /// Returns `None` when the user does not exist or has been
    /// soft-deleted.
    async fn find_user(&self, id: UserId) -> UserStoreResult<Option<User>>;

    /// Soft-deletes a user together with their tasks and owned categories.
    ///
    /// The whole cascade is stamped with `now` and applied in one critical
    /// section, and the pending-task guard is evaluated inside that same
    /// section: a task inserted or reopened concurrently cannot slip past
    /// the check. Audit logs of the cascaded tasks are kept.
    ///
    /// # Errors
    ///
    /// Returns [`UserStoreError::NotFound`] when the user does not exist or
    /// is already deleted, and [`UserStoreError::PendingTasks`] when the
    /// user still owns live pending tasks (nothing is changed in that
    /// case).
    async fn soft_delete_user_cascade(
        &self,
        id: UserId,
        now: DateTime<Utc>,
    ) -> UserStoreResult<()>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserStoreError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// Another live user already holds the email address.
    #[error("email address already registered: {0}")]
    DuplicateEmail(EmailAddress),

    /// The user was not found among live records.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// The user still owns live pending tasks, so the cascade refused.
    #[error("user {id} still owns {pending} live pending task(s)")]
    PendingTasks {
        /// User whose cascade was refused.
        id: UserId,
        /// Number of live pending tasks found under the lock.
        pending: usize,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
