//! Shared types for the HR materialized-view system.

mod types;

pub use types::EntityId;
