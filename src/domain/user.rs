//! User aggregate.

use super::{EmailAddress, TaskDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Account that owns tasks and personal categories.
///
/// Credential material is opaque to this crate: the hash is stored and
/// returned verbatim, and authentication happens in an external identity
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    display_name: String,
    email: EmailAddress,
    credential_hash: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new active user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDisplayName`] if the display name is
    /// empty or whitespace-only.
    pub fn new(
        display_name: impl Into<String>,
        email: EmailAddress,
        credential_hash: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw_name = display_name.into();
        if raw_name.trim().is_empty() {
            return Err(TaskDomainError::EmptyDisplayName);
        }
        let timestamp = clock.utc();

        Ok(Self {
            id: UserId::new(),
            display_name: raw_name,
            email,
            credential_hash: credential_hash.into(),
            active: true,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the opaque credential hash.
    #[must_use]
    pub fn credential_hash(&self) -> &str {
        &self.credential_hash
    }

    /// Returns whether the account is active.
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

    /// Deactivates the account without deleting it.
    ///
    /// Inactive users keep their records but may not receive new tasks.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.active = false;
        self.updated_at = clock.utc();
    }

    /// Marks the user as deleted at the given instant.
    ///
    /// Takes an explicit timestamp rather than a clock so a cascade can
    /// stamp the user and every owned record with the same instant.
    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}
