//! In-memory entity store.
//!
//! A thread-safe implementation of every repository port over one shared
//! state, suitable for unit testing and single-process deployments without
//! database dependencies. Holding all record sets behind a single lock is
//! what makes the cross-entity cascades (user deletion, category
//! detachment) atomic.

mod store;

pub use store::InMemoryEntityStore;
