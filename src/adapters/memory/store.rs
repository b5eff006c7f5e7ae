//! Shared-state store implementing all repository ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

use crate::domain::{
    Category, CategoryId, Task, TaskAuditEntry, TaskId, TaskStatus, User, UserId,
};
use crate::ports::{
    CategoryRepository, CategoryStoreError, CategoryStoreResult, TaskRepository, TaskStoreError,
    TaskStoreResult, UserRepository, UserStoreError, UserStoreResult,
};

/// Thread-safe in-memory entity store.
///
/// Implements [`UserRepository`], [`CategoryRepository`], and
/// [`TaskRepository`] over one `RwLock`-guarded state. Writers serialise on
/// the lock, which gives every multi-record operation (task insert with
/// referential checks, transition plus audit append, deletion cascades)
/// transactional behaviour for free. Reads see a consistent snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntityStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    categories: HashMap<CategoryId, Category>,
    tasks: HashMap<TaskId, Task>,
    audit_log: Vec<TaskAuditEntry>,
}

#[derive(Debug, Error)]
#[error("store lock poisoned: {0}")]
struct LockPoisoned(String);

impl InMemoryEntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, StoreState>, LockPoisoned> {
        self.state
            .read()
            .map_err(|err| LockPoisoned(err.to_string()))
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, StoreState>, LockPoisoned> {
        self.state
            .write()
            .map_err(|err| LockPoisoned(err.to_string()))
    }
}

/// Soft-delete filter applied by every read path.
fn live_user(state: &StoreState, id: UserId) -> Option<&User> {
    state.users.get(&id).filter(|user| user.is_live())
}

fn live_category(state: &StoreState, id: CategoryId) -> Option<&Category> {
    state
        .categories
        .get(&id)
        .filter(|category| category.is_live())
}

fn live_task(state: &StoreState, id: TaskId) -> Option<&Task> {
    state.tasks.get(&id).filter(|task| task.is_live())
}

#[async_trait]
impl UserRepository for InMemoryEntityStore {
    async fn insert_user(&self, user: &User) -> UserStoreResult<()> {
        let mut state = self.write_state().map_err(UserStoreError::persistence)?;
        if state.users.contains_key(&user.id()) {
            return Err(UserStoreError::DuplicateUser(user.id()));
        }
        let email_taken = state
            .users
            .values()
            .any(|existing| existing.is_live() && existing.email() == user.email());
        if email_taken {
            return Err(UserStoreError::DuplicateEmail(user.email().clone()));
        }

        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_user(&self, id: UserId) -> UserStoreResult<Option<User>> {
        let state = self.read_state().map_err(UserStoreError::persistence)?;
        Ok(live_user(&state, id).cloned())
    }

    async fn soft_delete_user_cascade(
        &self,
        id: UserId,
        now: DateTime<Utc>,
    ) -> UserStoreResult<()> {
        let mut state = self.write_state().map_err(UserStoreError::persistence)?;
        if live_user(&state, id).is_none() {
            return Err(UserStoreError::NotFound(id));
        }
        // Deletion guard, evaluated under the same lock as the cascade so
        // no writer can add pending work between the check and the delete.
        let pending = state
            .tasks
            .values()
            .filter(|task| {
                task.is_live() && task.owner_id() == id && task.status() == TaskStatus::Pending
            })
            .count();
        if pending > 0 {
            return Err(UserStoreError::PendingTasks { id, pending });
        }

        if let Some(user) = state.users.get_mut(&id) {
            user.soft_delete(now);
        }
        for task in state.tasks.values_mut() {
            if task.owner_id() == id && task.is_live() {
                task.soft_delete(now);
                task.bump_version();
            }
        }
        for category in state.categories.values_mut() {
            if category.owner_id() == Some(id) && category.is_live() {
                category.soft_delete(now);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryEntityStore {
    async fn insert_category(&self, category: &Category) -> CategoryStoreResult<()> {
        let mut state = self
            .write_state()
            .map_err(CategoryStoreError::persistence)?;
        if state.categories.contains_key(&category.id()) {
            return Err(CategoryStoreError::DuplicateCategory(category.id()));
        }
        let name_taken = state.categories.values().any(|existing| {
            existing.is_live()
                && existing.owner_id() == category.owner_id()
                && existing.name() == category.name()
        });
        if name_taken {
            return Err(CategoryStoreError::DuplicateName {
                name: category.name().to_owned(),
                owner: category.owner_id(),
            });
        }

        state.categories.insert(category.id(), category.clone());
        Ok(())
    }

    async fn find_category(&self, id: CategoryId) -> CategoryStoreResult<Option<Category>> {
        let state = self.read_state().map_err(CategoryStoreError::persistence)?;
        Ok(live_category(&state, id).cloned())
    }

    async fn soft_delete_category_detaching(
        &self,
        id: CategoryId,
        now: DateTime<Utc>,
    ) -> CategoryStoreResult<()> {
        let mut state = self
            .write_state()
            .map_err(CategoryStoreError::persistence)?;
        let category = state
            .categories
            .get_mut(&id)
            .filter(|category| category.is_live())
            .ok_or(CategoryStoreError::NotFound(id))?;
        category.soft_delete(now);

        // Tasks outlive their category; only the reference is cleared.
        for task in state.tasks.values_mut() {
            if task.category_id() == Some(id) && task.is_live() {
                task.clear_category(now);
                task.bump_version();
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryEntityStore {
    async fn insert_task(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write_state().map_err(TaskStoreError::persistence)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        // Referential checks under the write lock: the owner and category
        // verified here cannot be deleted before the insert lands.
        if live_user(&state, task.owner_id()).is_none() {
            return Err(TaskStoreError::OwnerNotLive(task.owner_id()));
        }
        if let Some(category_id) = task.category_id() {
            if live_category(&state, category_id).is_none() {
                return Err(TaskStoreError::CategoryNotLive(category_id));
            }
        }

        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read_state().map_err(TaskStoreError::persistence)?;
        Ok(live_task(&state, id).cloned())
    }

    async fn list_tasks(&self, owner: Option<UserId>) -> TaskStoreResult<Vec<Task>> {
        let state = self.read_state().map_err(TaskStoreError::persistence)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.is_live())
            .filter(|task| owner.is_none_or(|owner| task.owner_id() == owner))
            .cloned()
            .collect())
    }

    async fn apply_transition(
        &self,
        task: &Task,
        entry: &TaskAuditEntry,
    ) -> TaskStoreResult<Task> {
        let mut state = self.write_state().map_err(TaskStoreError::persistence)?;
        let stored = live_task(&state, task.id()).ok_or(TaskStoreError::NotFound(task.id()))?;
        if stored.version() != task.version() {
            return Err(TaskStoreError::VersionConflict(task.id()));
        }

        let mut committed = task.clone();
        committed.bump_version();
        state.tasks.insert(committed.id(), committed.clone());
        state.audit_log.push(entry.clone());
        Ok(committed)
    }

    async fn audit_trail(&self, task_id: TaskId) -> TaskStoreResult<Vec<TaskAuditEntry>> {
        let state = self.read_state().map_err(TaskStoreError::persistence)?;
        let mut trail: Vec<TaskAuditEntry> = state
            .audit_log
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .cloned()
            .collect();
        trail.sort_by_key(TaskAuditEntry::changed_at);
        Ok(trail)
    }
}
