//! Materialized employee views over a document store.
//!
//! This crate is the read-optimized side of the HR system:
//! - [`ReferenceDataCache`] holds cities, divisions and positions by id
//! - [`ViewProjection`] joins one employee against the cache into a view row
//! - [`ViewMaterializer`] runs every projection over all employees and writes the rows
//! - [`ViewReader`] serves the stored rows in caller-facing shapes
//! - [`HrApp`] ties them together behind an initialize-once lifecycle

pub mod app;
pub mod cache;
pub mod error;
pub mod materializer;
pub mod projection;
pub mod reader;
pub mod views;

pub use app::HrApp;
pub use cache::{KindSummary, LoadSummary, ReferenceDataCache, ReferenceEntity, ReferenceKind};
pub use error::{ProjectionError, Result};
pub use materializer::{
    MaterializationReport, ViewMaterializer, ViewTally, WriteFailure, WritePolicy,
};
pub use projection::{MissingReference, UnresolvedReference, ViewProjection};
pub use reader::ViewReader;
pub use views::{
    EmployeeWithCity, EmployeeWithCityProjection, EmployeeWithPosition,
    EmployeeWithPositionProjection,
};
