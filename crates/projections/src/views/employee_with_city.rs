//! Employee-with-city view: each employee joined with the name of their city.

use domain::{Document, DocumentKind, Employee, EmployeeWithCityView};
use serde::{Deserialize, Serialize};

use crate::cache::{ReferenceDataCache, ReferenceKind};
use crate::projection::{MissingReference, ViewProjection};

/// Caller-facing shape of an employee-with-city row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWithCity {
    pub first_name: String,
    pub city: String,
}

impl EmployeeWithCity {
    /// Projects stored view data, or `None` if a required field is missing,
    /// empty, or not a string.
    pub fn from_view_data(data: &serde_json::Value) -> Option<Self> {
        let row = Self::deserialize(data).ok()?;
        (!row.first_name.is_empty() && !row.city.is_empty()).then_some(row)
    }
}

/// Produces an [`EmployeeWithCityView`] for every employee whose city resolves.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeWithCityProjection;

impl ViewProjection for EmployeeWithCityProjection {
    fn name(&self) -> &'static str {
        "EmployeeWithCityView"
    }

    fn view_kind(&self) -> DocumentKind {
        DocumentKind::EmployeeWithCityView
    }

    fn project(
        &self,
        employee: &Employee,
        cache: &ReferenceDataCache,
    ) -> Result<Document, MissingReference> {
        match cache.city(&employee.city_id) {
            Some(city) => Ok(Document::EmployeeWithCityView(
                EmployeeWithCityView::join(employee, city),
            )),
            None => {
                let mut missing = MissingReference::new(employee.id.clone());
                missing.push(ReferenceKind::City, &employee.city_id);
                Err(missing)
            }
        }
    }
}
