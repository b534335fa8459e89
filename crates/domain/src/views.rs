//! Denormalized view rows. Produced only by the materializer.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::{City, Division, Employee, Position};

/// An employee joined with the name of their city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWithCityView {
    /// Id of the source employee.
    pub id: EntityId,
    pub first_name: String,
    pub city: String,
}

/// An employee joined with the names of their position and division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWithPositionView {
    /// Id of the source employee.
    pub id: EntityId,
    pub first_name: String,
    pub position: String,
    pub division: String,
}

impl EmployeeWithCityView {
    /// Joins an employee with its resolved city.
    pub fn join(employee: &Employee, city: &City) -> Self {
        Self {
            id: employee.id.clone(),
            first_name: employee.first_name.clone(),
            city: city.name.clone(),
        }
    }
}

impl EmployeeWithPositionView {
    /// Joins an employee with its resolved position and division.
    pub fn join(employee: &Employee, position: &Position, division: &Division) -> Self {
        Self {
            id: employee.id.clone(),
            first_name: employee.first_name.clone(),
            position: position.name.clone(),
            division: division.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_join_keeps_employee_id() {
        let employee = Employee::new("e1", "Ann").with_city("c1");
        let row = EmployeeWithCityView::join(&employee, &City::new("c1", "Almaty"));

        assert_eq!(row.id, employee.id);
        assert_eq!(row.first_name, "Ann");
        assert_eq!(row.city, "Almaty");
    }

    #[test]
    fn position_join_takes_both_names() {
        let employee = Employee::new("e3", "Bo")
            .with_position("p1")
            .with_division("d1");
        let row = EmployeeWithPositionView::join(
            &employee,
            &Position::new("p1", "Developer"),
            &Division::new("d1", "IT", "c1"),
        );

        assert_eq!(row.id, employee.id);
        assert_eq!(row.position, "Developer");
        assert_eq!(row.division, "IT");
    }
}
