//! Write-back requests for normalized entities.

use serde::{Deserialize, Serialize};

use crate::DocumentKind;

/// A normalized entity kind that callers may ask to update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Employee,
    City,
    Position,
    Division,
}

impl EntityKind {
    /// Returns the document kind this entity is stored under.
    pub fn document_kind(&self) -> DocumentKind {
        match self {
            EntityKind::Employee => DocumentKind::Employee,
            EntityKind::City => DocumentKind::City,
            EntityKind::Position => DocumentKind::Position,
            EntityKind::Division => DocumentKind::Division,
        }
    }
}

/// A request to update a normalized entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub entity: EntityKind,
    pub data: serde_json::Value,
}

impl UpdateRequest {
    pub fn new(entity: EntityKind, data: serde_json::Value) -> Self {
        Self { entity, data }
    }
}
