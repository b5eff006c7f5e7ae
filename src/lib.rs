//! Taskledger: multi-user task tracking with an audited lifecycle.
//!
//! This crate provides the task lifecycle engine for a multi-user tracker:
//! tasks belong to a user and an optional category, carry a priority, a
//! status, and a due date, and every status change is appended to an
//! immutable audit log. Records are soft-deleted, never removed, so the
//! history stays available for reporting.
//!
//! # Architecture
//!
//! Taskledger follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory store, etc.)
//! - **Services**: Orchestration of lifecycle, deletion, and reporting flows
//!
//! # Modules
//!
//! - [`domain`]: Aggregates, validated value types, and transition rules
//! - [`ports`]: Entity store contracts
//! - [`adapters`]: Store implementations
//! - [`services`]: Lifecycle engine, deletion guard, and derived views

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
