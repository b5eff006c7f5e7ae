//! Task aggregate root and lifecycle transition rules.

use super::{CategoryId, ParseStatusError, TaskId, TaskTitle, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Pending,
    /// Task is being worked on.
    InProgress,
    /// Task has been finished.
    Completed,
    /// Task has been called off.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether the status ends the task's active life.
    ///
    /// Terminal here means "no longer actionable"; it does not restrict
    /// transitions. Reopening a completed or cancelled task is allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal workload.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Drop everything else.
    Urgent,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Parses free-form priority input, defaulting to [`Self::Medium`].
    ///
    /// Priority labels come from callers typing them, so an unrecognised
    /// value degrades to the default instead of failing the whole request.
    #[must_use]
    pub fn from_label(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            "urgent" => Self::Urgent,
            _ => Self::Medium,
        }
    }
}

/// Recorded status change produced by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// Status before the transition.
    pub from: TaskStatus,
    /// Status after the transition.
    pub to: TaskStatus,
}

/// Task aggregate root.
///
/// Mutation happens only through the lifecycle methods, which keep the
/// derived fields honest: `completed_at` is `Some` exactly when the status
/// is [`TaskStatus::Completed`], and `updated_at` moves on every change.
/// The version counter supports optimistic concurrency in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner_id: UserId,
    category_id: Option<CategoryId>,
    title: TaskTitle,
    description: Option<String>,
    priority: TaskPriority,
    status: TaskStatus,
    due_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    version: u64,
}

impl Task {
    /// Creates a new pending task.
    #[must_use]
    pub fn new(owner_id: UserId, title: TaskTitle, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();

        Self {
            id: TaskId::new(),
            owner_id,
            category_id: None,
            title,
            description: None,
            priority: TaskPriority::default(),
            status: TaskStatus::Pending,
            due_at: None,
            completed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
            version: 0,
        }
    }

    /// Attaches the task to a category.
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
        self.priority = priority;
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the category, if any.
    #[must_use]
    pub const fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the completion timestamp.
    ///
    /// `Some` exactly when [`Self::status`] is [`TaskStatus::Completed`].
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-deletion timestamp, if any.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns whether the record has not been soft-deleted.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Returns the optimistic-concurrency version counter.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Moves the task to a new status.
    ///
    /// Returns `None` when the new status equals the current one: the task
    /// is left untouched, so repeating a transition produces no duplicate
    /// audit entry and no timestamp churn. Otherwise returns the change to
    /// be recorded in the audit log. Entering [`TaskStatus::Completed`]
    /// stamps `completed_at`; leaving it (including reopening) clears it.
    pub fn transition_to(&mut self, new_status: TaskStatus, clock: &impl Clock) -> Option<StatusChange> {
        if new_status == self.status {
            return None;
        }

        let now = clock.utc();
        self.completed_at = if new_status == TaskStatus::Completed {
            Some(now)
        } else {
            None
        };

        let change = StatusChange {
            from: self.status,
            to: new_status,
        };
        self.status = new_status;
        self.updated_at = now;
        Some(change)
    }

    /// Detaches the task from its category.
    ///
    /// Used when a category is deleted; tasks survive with a cleared
    /// reference.
    pub fn clear_category(&mut self, now: DateTime<Utc>) {
        self.category_id = None;
        self.updated_at = now;
    }

    /// Marks the task as deleted at the given instant.
    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Advances the version counter after a persisted write.
    ///
    /// Called by store adapters only; every persisted mutation must bump
    /// the version so concurrent writers observe the conflict.
    pub(crate) const fn bump_version(&mut self) {
        self.version += 1;
    }
}
