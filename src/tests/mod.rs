//! Unit test suites for the tracker.
#![expect(
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::shadow_reuse,
    reason = "tests fail loudly on impossible states and assert on known-shaped data"
)]

mod helpers;
mod lifecycle_tests;
mod serialization_tests;
