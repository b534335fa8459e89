//! Domain types for the HR materialized-view system.
//!
//! This crate declares the schema of every document kind:
//! - normalized entities: [`City`], [`Division`], [`Position`], [`Employee`]
//! - denormalized view rows: [`EmployeeWithCityView`], [`EmployeeWithPositionView`]
//! - the closed [`Document`] union keyed by [`DocumentKind`], with a single
//!   validation entry point, [`Document::validate`]

pub mod document;
pub mod entities;
pub mod error;
pub mod update;
pub mod views;

pub use document::{Document, DocumentKind};
pub use entities::{City, Division, Employee, Position};
pub use error::SchemaViolation;
pub use update::{EntityKind, UpdateRequest};
pub use views::{EmployeeWithCityView, EmployeeWithPositionView};
