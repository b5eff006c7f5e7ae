//! Deletion guard and cascade orchestration.
//!
//! Users with pending work cannot be removed; categories can always be
//! removed because their tasks survive detached. The pending-task guard is
//! enforced by the store inside the cascade's critical section; this
//! service translates the store's refusal into the caller-facing error.

use crate::domain::{CategoryId, UserId};
use crate::ports::{CategoryRepository, CategoryStoreError, UserRepository, UserStoreError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for deletion operations.
#[derive(Debug, Error)]
pub enum DeletionError {
    /// The user still owns pending tasks.
    #[error("cannot delete user {user_id} with {pending} pending task(s)")]
    PendingTasks {
        /// User whose deletion was blocked.
        user_id: UserId,
        /// Number of live pending tasks blocking the deletion.
        pending: usize,
    },
    /// The user is missing or already deleted.
    #[error("no live user for id {0}")]
    UserNotFound(UserId),
    /// The category is missing or already deleted.
    #[error("no live category for id {0}")]
    CategoryNotFound(CategoryId),
    /// User store operation failed.
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    /// Category store operation failed.
    #[error(transparent)]
    CategoryStore(#[from] CategoryStoreError),
}

/// Result type for deletion operations.
pub type DeletionResult<T> = Result<T, DeletionError>;

/// Guarded deletion service.
#[derive(Clone)]
pub struct DeletionService<S, C>
where
    S: UserRepository + CategoryRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> DeletionService<S, C>
where
    S: UserRepository + CategoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new deletion service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Soft-deletes a user together with their tasks and owned categories.
    ///
    /// Blocked while the user owns any live pending task. Tasks in
    /// progress do not block; only pending ones count. When the guard
    /// rejects, no state changes at all. The guard check and the cascade
    /// run in one store critical section, so a task created concurrently
    /// either blocks the deletion or arrives after the owner is gone.
    ///
    /// # Errors
    ///
    /// Returns [`DeletionError::PendingTasks`] when the guard blocks the
    /// deletion and [`DeletionError::UserNotFound`] when the user is
    /// missing or already deleted.
    pub async fn delete_user(&self, user_id: UserId) -> DeletionResult<()> {
        match self
            .store
            .soft_delete_user_cascade(user_id, self.clock.utc())
            .await
        {
            Ok(()) => Ok(()),
            Err(UserStoreError::NotFound(id)) => Err(DeletionError::UserNotFound(id)),
            Err(UserStoreError::PendingTasks { id, pending }) => {
                Err(DeletionError::PendingTasks {
                    user_id: id,
                    pending,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Soft-deletes a category, detaching its live tasks.
    ///
    /// Always allowed: tasks keep their history and simply lose the
    /// category reference.
    ///
    /// # Errors
    ///
    /// Returns [`DeletionError::CategoryNotFound`] when the category is
    /// missing or already deleted.
    pub async fn delete_category(&self, category_id: CategoryId) -> DeletionResult<()> {
        match self
            .store
            .soft_delete_category_detaching(category_id, self.clock.utc())
            .await
        {
            Ok(()) => Ok(()),
            Err(CategoryStoreError::NotFound(id)) => Err(DeletionError::CategoryNotFound(id)),
            Err(err) => Err(err.into()),
        }
    }
}
