//! Normalized entities. The document store is their source of truth.

use common::EntityId;
use serde::{Deserialize, Serialize};

/// A city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: EntityId,
    pub name: String,
}

/// An organizational division, located in a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub id: EntityId,
    pub name: String,
    pub city_id: EntityId,
}

/// A job position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: EntityId,
    pub name: String,
}

/// An employee, referencing a division, a city and a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EntityId,
    pub first_name: String,
    // Not needed by any view, so a missing last name does not disqualify a record.
    #[serde(default)]
    pub last_name: String,
    pub division_id: EntityId,
    pub city_id: EntityId,
    pub position_id: EntityId,
}

impl City {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Division {
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        city_id: impl Into<EntityId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city_id: city_id.into(),
        }
    }
}

impl Position {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Employee {
    /// Starts building an employee with the given id and first name.
    ///
    /// All references start out empty and are set with the `with_*` methods.
    pub fn new(id: impl Into<EntityId>, first_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: String::new(),
            division_id: EntityId::new(""),
            city_id: EntityId::new(""),
            position_id: EntityId::new(""),
        }
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    pub fn with_city(mut self, city_id: impl Into<EntityId>) -> Self {
        self.city_id = city_id.into();
        self
    }

    pub fn with_division(mut self, division_id: impl Into<EntityId>) -> Self {
        self.division_id = division_id.into();
        self
    }

    pub fn with_position(mut self, position_id: impl Into<EntityId>) -> Self {
        self.position_id = position_id.into();
        self
    }
}
