//! Adapter implementations of the entity store ports.

pub mod memory;
