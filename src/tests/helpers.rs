//! Shared fixtures for the unit suites.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex};

use crate::adapters::memory::InMemoryEntityStore;
use crate::domain::UserId;
use crate::services::{
    DeletionService, RegistryService, ReportingService, TaskLifecycleService,
};

/// Deterministic clock that only moves when a test advances it.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock frozen at `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, delta: TimeDelta) {
        *self.now.lock().expect("clock lock") += delta;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

/// Arbitrary but fixed test epoch.
pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid test epoch")
}

/// All services wired to one shared store and one fixed clock.
pub struct Harness {
    pub store: Arc<InMemoryEntityStore>,
    pub clock: Arc<FixedClock>,
    pub registry: RegistryService<InMemoryEntityStore, FixedClock>,
    pub lifecycle: TaskLifecycleService<InMemoryEntityStore, FixedClock>,
    pub deletion: DeletionService<InMemoryEntityStore, FixedClock>,
    pub reporting: ReportingService<InMemoryEntityStore, FixedClock>,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryEntityStore::new());
        let clock = Arc::new(FixedClock::at(test_epoch()));
        Self {
            registry: RegistryService::new(Arc::clone(&store), Arc::clone(&clock)),
            lifecycle: TaskLifecycleService::new(Arc::clone(&store), Arc::clone(&clock)),
            deletion: DeletionService::new(Arc::clone(&store), Arc::clone(&clock)),
            reporting: ReportingService::new(Arc::clone(&store), Arc::clone(&clock)),
            store,
            clock,
        }
    }

    /// Registers an active user with a derived unique email.
    pub async fn register_user(&self, name: &str) -> UserId {
        self.registry
            .register_user(name, format!("{name}@example.com"), "opaque-hash")
            .await
            .expect("user registration should succeed")
    }
}
