//! Port contracts for the entity store.
//!
//! One repository trait per record set, all implemented by a single store
//! adapter so cross-entity cascades stay atomic. Every read excludes
//! soft-deleted records unless documented otherwise.

mod categories;
mod tasks;
mod users;

pub use categories::{CategoryRepository, CategoryStoreError, CategoryStoreResult};
pub use tasks::{TaskRepository, TaskStoreError, TaskStoreResult};
pub use users::{UserRepository, UserStoreError, UserStoreResult};
