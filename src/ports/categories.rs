//! Repository port for category persistence and detachment on deletion.

use crate::domain::{Category, CategoryId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for category repository operations.
pub type CategoryStoreResult<T> = Result<T, CategoryStoreError>;

/// Category persistence contract.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Stores a new category.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryStoreError::DuplicateCategory`] when the identifier
    /// already exists or [`CategoryStoreError::DuplicateName`] when a live
    /// category with the same `(name, owner)` pair exists.
    async fn insert_category(&self, category: &Category) -> CategoryStoreResult<()>;

    /// Finds a live category by identifier.
    ///
    /// Returns `None` when the category does not exist or has been
    /// soft-deleted.
    async fn find_category(&self, id: CategoryId) -> CategoryStoreResult<Option<Category>>;

    /// Soft-deletes a category, clearing the reference on its live tasks.
    ///
    /// Tasks are never deleted by this operation; they survive with
    /// `category_id` = `None`. Detachment and deletion are applied in one
    /// critical section, stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryStoreError::NotFound`] when the category does not
    /// exist or is already deleted.
    async fn soft_delete_category_detaching(
        &self,
        id: CategoryId,
        now: DateTime<Utc>,
    ) -> CategoryStoreResult<()>;
}

/// Errors returned by category repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CategoryStoreError {
    /// A category with the same identifier already exists.
    #[error("duplicate category identifier: {0}")]
    DuplicateCategory(CategoryId),

    /// A live category with the same name already exists for the owner.
    #[error("duplicate category name '{name}' for owner {owner:?}")]
    DuplicateName {
        /// Conflicting category name.
        name: String,
        /// Owning user, or `None` for a global category.
        owner: Option<UserId>,
    },

    /// The category was not found among live records.
    #[error("category not found: {0}")]
    NotFound(CategoryId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CategoryStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
