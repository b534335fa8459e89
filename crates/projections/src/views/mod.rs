//! Materialized view definitions and their caller-facing row shapes.

pub mod employee_with_city;
pub mod employee_with_position;

pub use employee_with_city::{EmployeeWithCity, EmployeeWithCityProjection};
pub use employee_with_position::{EmployeeWithPosition, EmployeeWithPositionProjection};

use crate::projection::ViewProjection;

/// Returns the two standard employee views.
pub fn standard_views() -> Vec<Box<dyn ViewProjection>> {
    vec![
        Box::new(EmployeeWithCityProjection),
        Box::new(EmployeeWithPositionProjection),
    ]
}
