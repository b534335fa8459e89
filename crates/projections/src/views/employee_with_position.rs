//! Employee-with-position view: each employee joined with their position and division names.

use domain::{Document, DocumentKind, Employee, EmployeeWithPositionView};
use serde::{Deserialize, Serialize};

use crate::cache::{ReferenceDataCache, ReferenceKind};
use crate::projection::{MissingReference, ViewProjection};

/// Caller-facing shape of an employee-with-position row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWithPosition {
    pub first_name: String,
    pub position: String,
    pub division: String,
}

impl EmployeeWithPosition {
    /// Projects stored view data, or `None` if a required field is missing,
    /// empty, or not a string.
    pub fn from_view_data(data: &serde_json::Value) -> Option<Self> {
        let row = Self::deserialize(data).ok()?;
        let complete =
            !row.first_name.is_empty() && !row.position.is_empty() && !row.division.is_empty();
        complete.then_some(row)
    }
}

/// Produces an [`EmployeeWithPositionView`] for every employee whose position
/// and division both resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeWithPositionProjection;

impl ViewProjection for EmployeeWithPositionProjection {
    fn name(&self) -> &'static str {
        "EmployeeWithPositionView"
    }

    fn view_kind(&self) -> DocumentKind {
        DocumentKind::EmployeeWithPositionView
    }

    fn project(
        &self,
        employee: &Employee,
        cache: &ReferenceDataCache,
    ) -> Result<Document, MissingReference> {
        let position = cache.position(&employee.position_id);
        let division = cache.division(&employee.division_id);

        match (position, division) {
            (Some(position), Some(division)) => Ok(Document::EmployeeWithPositionView(
                EmployeeWithPositionView::join(employee, position, division),
            )),
            (position, division) => {
                let mut missing = MissingReference::new(employee.id.clone());
                if position.is_none() {
                    missing.push(ReferenceKind::Position, &employee.position_id);
                }
                if division.is_none() {
                    missing.push(ReferenceKind::Division, &employee.division_id);
                }
                Err(missing)
            }
        }
    }
}
