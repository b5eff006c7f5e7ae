//! Service layer for user and category registration.

use crate::domain::{
    Category, CategoryId, EmailAddress, TaskDomainError, User, UserId,
};
use crate::ports::{CategoryRepository, CategoryStoreError, UserRepository, UserStoreError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for registration operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),
    /// User store operation failed.
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    /// Category store operation failed.
    #[error(transparent)]
    CategoryStore(#[from] CategoryStoreError),
}

/// Result type for registration operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// User and category registration service.
#[derive(Clone)]
pub struct RegistryService<S, C>
where
    S: UserRepository + CategoryRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> RegistryService<S, C>
where
    S: UserRepository + CategoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new registration service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Registers a new active user.
    ///
    /// The credential hash is stored verbatim; hashing and verification
    /// belong to the external identity collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] for an empty display name or a
    /// malformed email, and [`RegistryError::UserStore`] when the email is
    /// already registered.
    pub async fn register_user(
        &self,
        display_name: impl Into<String> + Send,
        email: impl Into<String> + Send,
        credential_hash: impl Into<String> + Send,
    ) -> RegistryResult<UserId> {
        let address = EmailAddress::new(email)?;
        let user = User::new(display_name, address, credential_hash, &*self.clock)?;
        self.store.insert_user(&user).await?;
        Ok(user.id())
    }

    /// Creates a category, owned by a user or global when `owner_id` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] for an empty name and
    /// [`RegistryError::CategoryStore`] when the `(name, owner)` pair is
    /// taken.
    pub async fn create_category(
        &self,
        name: impl Into<String> + Send,
        owner_id: Option<UserId>,
        color: Option<String>,
        description: Option<String>,
    ) -> RegistryResult<CategoryId> {
        let mut category = Category::new(name, owner_id, &*self.clock)?;
        if let Some(tag) = color {
            category = category.with_color(tag);
        }
        if let Some(text) = description {
            category = category.with_description(text);
        }
        self.store.insert_category(&category).await?;
        Ok(category.id())
    }
}
