//! Append-only audit log entries for task status changes.

use super::{AuditEntryId, StatusChange, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of one status transition.
///
/// Entries are appended when a transition actually changes the status;
/// task creation and same-status no-ops leave no trace. Soft-deleting a
/// task keeps its log so historical reporting stays complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAuditEntry {
    id: AuditEntryId,
    task_id: TaskId,
    from_status: TaskStatus,
    to_status: TaskStatus,
    changed_at: DateTime<Utc>,
}

impl TaskAuditEntry {
    /// Creates an audit entry for a recorded change.
    ///
    /// `changed_at` should be the same instant stamped on the task by the
    /// transition, so the log and the record agree.
    #[must_use]
    pub fn new(task_id: TaskId, change: StatusChange, changed_at: DateTime<Utc>) -> Self {
        Self {
            id: AuditEntryId::new(),
            task_id,
            from_status: change.from,
            to_status: change.to,
            changed_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> AuditEntryId {
        self.id
    }

    /// Returns the task this entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status before the transition.
    #[must_use]
    pub const fn from_status(&self) -> TaskStatus {
        self.from_status
    }

    /// Returns the status after the transition.
    #[must_use]
    pub const fn to_status(&self) -> TaskStatus {
        self.to_status
    }

    /// Returns when the transition happened.
    #[must_use]
    pub const fn changed_at(&self) -> DateTime<Utc> {
        self.changed_at
    }
}
