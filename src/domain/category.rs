//! Category aggregate.

use super::{CategoryId, TaskDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Grouping label for tasks.
///
/// A category is either owned by a single user or global (`owner_id` =
/// `None`), in which case every user may attach tasks to it. The `(name,
/// owner)` pair is unique among live categories; the store enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    color: Option<String>,
    description: Option<String>,
    owner_id: Option<UserId>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Creates a new active category.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCategoryName`] if the name is empty
    /// or whitespace-only.
    pub fn new(
        name: impl Into<String>,
        owner_id: Option<UserId>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw_name = name.into();
        if raw_name.trim().is_empty() {
            return Err(TaskDomainError::EmptyCategoryName);
        }
        let timestamp = clock.utc();

        Ok(Self {
            id: CategoryId::new(),
            name: raw_name,
            color: None,
            description: None,
            owner_id,
            active: true,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        })
    }

    /// Sets the colour tag.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the category identifier.
    #[must_use]
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Returns the category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the colour tag, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning user, or `None` for a global category.
    #[must_use]
    pub const fn owner_id(&self) -> Option<UserId> {
        self.owner_id
    }

    /// Returns whether the category is global (usable by every user).
    #[must_use]
    pub const fn is_global(&self) -> bool {
        self.owner_id.is_none()
    }

    /// Returns whether the given user may attach tasks to this category.
    #[must_use]
    pub fn is_available_to(&self, user_id: UserId) -> bool {
        self.owner_id.is_none_or(|owner| owner == user_id)
    }

    /// Returns whether the category is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns whether the record has not been soft-deleted.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Returns the soft-deletion timestamp, if any.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Marks the category as deleted at the given instant.
    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}
