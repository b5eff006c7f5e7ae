//! Domain model for the task tracker.
//!
//! The domain covers users, categories, tasks, and the append-only status
//! audit log while keeping all infrastructure concerns outside of the
//! domain boundary. Lifecycle rules (completion timestamps, audit emission,
//! soft deletion) live on the aggregates themselves so every caller shares
//! one implementation of the invariants.

mod audit;
mod category;
mod error;
mod ids;
mod task;
mod user;

pub use audit::TaskAuditEntry;
pub use category::Category;
pub use error::{ParseStatusError, TaskDomainError};
pub use ids::{AuditEntryId, CategoryId, EmailAddress, TaskId, TaskTitle, UserId};
pub use task::{StatusChange, Task, TaskPriority, TaskStatus};
pub use user::User;
