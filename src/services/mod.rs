//! Orchestration services over the entity store.
//!
//! - [`registry`]: user and category registration
//! - [`lifecycle`]: task creation and audited status transitions
//! - [`deletion`]: guarded user deletion and category detachment
//! - [`reporting`]: dashboard and productivity projections

pub mod deletion;
pub mod lifecycle;
pub mod registry;
pub mod reporting;

pub use deletion::{DeletionError, DeletionResult, DeletionService};
pub use lifecycle::{
    CreateTaskRequest, LifecycleError, LifecycleResult, TaskLifecycleService,
};
pub use registry::{RegistryError, RegistryResult, RegistryService};
pub use reporting::{
    DashboardRow, ProductivityRow, ReportError, ReportResult, ReportingService, TaskSituation,
};
