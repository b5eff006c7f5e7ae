//! Derived read models: dashboard classification and productivity report.
//!
//! Both projections are computed from current entity state on demand and
//! never persisted. They take read access only and tolerate running
//! alongside writers.

use crate::domain::{CategoryId, Task, TaskId, TaskPriority, TaskStatus, UserId};
use crate::ports::{
    CategoryRepository, CategoryStoreError, TaskRepository, TaskStoreError, UserRepository,
    UserStoreError,
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Urgency classification of a task on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskSituation {
    /// Due date passed while the task is still actionable.
    Overdue,
    /// Due within the next 24 hours.
    Urgent,
    /// Everything else, including tasks without a due date.
    OnTrack,
}

impl TaskSituation {
    /// Returns the canonical report representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "OVERDUE",
            Self::Urgent => "URGENT",
            Self::OnTrack => "ON_TRACK",
        }
    }
}

/// One dashboard line: a live task joined with its owner and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardRow {
    /// Task identifier.
    pub task_id: TaskId,
    /// Task title.
    pub title: String,
    /// Owning user.
    pub owner_id: UserId,
    /// Owner display name.
    pub owner_name: String,
    /// Category identifier, if the task has one.
    pub category_id: Option<CategoryId>,
    /// Category name, if the task has a live category.
    pub category_name: Option<String>,
    /// Task priority.
    pub priority: TaskPriority,
    /// Task status.
    pub status: TaskStatus,
    /// Due timestamp, if any.
    pub due_at: Option<DateTime<Utc>>,
    /// Urgency classification at report time.
    pub situation: TaskSituation,
}

/// Per-user productivity aggregate over completed tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductivityRow {
    /// User the row aggregates.
    pub user_id: UserId,
    /// User display name.
    pub display_name: String,
    /// Number of live completed tasks.
    pub total: usize,
    /// Share of the counted tasks that are completed, in percent.
    ///
    /// The aggregate is scoped to completed tasks, so this is 100 by
    /// construction. Kept as an explicit field because downstream
    /// consumers read it; see the crate design notes before changing the
    /// scoping.
    pub completion_rate: f64,
    /// Mean hours from creation to completion, rounded to one decimal.
    pub avg_resolution_hours: f64,
}

/// Service-level errors for report generation.
#[derive(Debug, Error)]
pub enum ReportError {
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

/// Result type for report generation.
pub type ReportResult<T> = Result<T, ReportError>;

/// Derived view builder.
#[derive(Clone)]
pub struct ReportingService<S, C>
where
    S: UserRepository + CategoryRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ReportingService<S, C>
where
    S: UserRepository + CategoryRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new reporting service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Builds the dashboard, optionally restricted to one user.
    ///
    /// Each live task is joined with its live owner (rows without one are
    /// dropped) and its live category (optional). Rows are ordered by task
    /// identifier so repeated runs compare equal.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when a store read fails.
    pub async fn dashboard(&self, for_user: Option<UserId>) -> ReportResult<Vec<DashboardRow>> {
        let now = self.clock.utc();
        let mut tasks = self.store.list_tasks(for_user).await?;
        tasks.sort_by_key(Task::id);

        let mut rows = Vec::with_capacity(tasks.len());
        for task in tasks {
            let Some(owner) = self.store.find_user(task.owner_id()).await? else {
                continue;
            };
            let category_name = match task.category_id() {
                Some(category_id) => self
                    .store
                    .find_category(category_id)
                    .await?
                    .map(|category| category.name().to_owned()),
                None => None,
            };

            rows.push(DashboardRow {
                task_id: task.id(),
                title: task.title().as_str().to_owned(),
                owner_id: owner.id(),
                owner_name: owner.display_name().to_owned(),
                category_id: task.category_id(),
                category_name,
                priority: task.priority(),
                status: task.status(),
                due_at: task.due_at(),
                situation: classify(&task, now),
            });
        }
        Ok(rows)
    }

    /// Builds the productivity report, optionally restricted to one user.
    ///
    /// Aggregates live completed tasks per user; users without any
    /// completed task emit no row. Rows are ordered by user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when a store read fails.
    pub async fn productivity_report(
        &self,
        for_user: Option<UserId>,
    ) -> ReportResult<Vec<ProductivityRow>> {
        let tasks = self.store.list_tasks(for_user).await?;

        let mut per_user: BTreeMap<UserId, Vec<Task>> = BTreeMap::new();
        for task in tasks {
            if task.status() == TaskStatus::Completed {
                per_user.entry(task.owner_id()).or_default().push(task);
            }
        }

        let mut rows = Vec::with_capacity(per_user.len());
        for (user_id, completed) in per_user {
            let Some(user) = self.store.find_user(user_id).await? else {
                continue;
            };

            rows.push(ProductivityRow {
                user_id,
                display_name: user.display_name().to_owned(),
                total: completed.len(),
                completion_rate: 100.0,
                avg_resolution_hours: average_resolution_hours(&completed),
            });
        }
        Ok(rows)
    }
}

/// Classifies a task's due-date situation at `now`.
///
/// Overdue applies only to actionable tasks; the urgent window applies
/// regardless of status, mirroring the dashboard's historical behaviour.
fn classify(task: &Task, now: DateTime<Utc>) -> TaskSituation {
    let Some(due_at) = task.due_at() else {
        return TaskSituation::OnTrack;
    };
    if due_at < now && !task.status().is_terminal() {
        TaskSituation::Overdue
    } else if due_at >= now && due_at <= now + TimeDelta::hours(24) {
        TaskSituation::Urgent
    } else {
        TaskSituation::OnTrack
    }
}

/// Mean hours from creation to completion, rounded to one decimal.
///
/// Callers only pass non-empty groups, one per user with completed work.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "report averages are approximate human-facing figures"
)]
fn average_resolution_hours(completed: &[Task]) -> f64 {
    let hours: f64 = completed.iter().filter_map(resolution_hours).sum();
    round_tenths(hours / completed.len() as f64)
}

/// Hours from creation to completion, `None` for uncompleted tasks.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "whole-second counts are well inside f64 precision"
)]
fn resolution_hours(task: &Task) -> Option<f64> {
    let completed_at = task.completed_at()?;
    Some((completed_at - task.created_at()).num_seconds() as f64 / 3600.0)
}

#[expect(clippy::float_arithmetic, reason = "display rounding only")]
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
