//! The closed set of document kinds and their typed union.

use std::borrow::Cow;

use document_store::DocumentRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaViolation;
use crate::{City, Division, Employee, EmployeeWithCityView, EmployeeWithPositionView, Position};

/// Type tag of a document, exactly as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    #[serde(rename = "employee")]
    Employee,
    #[serde(rename = "city")]
    City,
    #[serde(rename = "division")]
    Division,
    #[serde(rename = "position")]
    Position,
    #[serde(rename = "employeeWithCity_view")]
    EmployeeWithCityView,
    #[serde(rename = "employeeWithPosition_view")]
    EmployeeWithPositionView,
}

impl DocumentKind {
    /// Every document kind, normalized entities first.
    pub const ALL: [DocumentKind; 6] = [
        DocumentKind::Employee,
        DocumentKind::City,
        DocumentKind::Division,
        DocumentKind::Position,
        DocumentKind::EmployeeWithCityView,
        DocumentKind::EmployeeWithPositionView,
    ];

    /// Returns the wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Employee => "employee",
            DocumentKind::City => "city",
            DocumentKind::Division => "division",
            DocumentKind::Position => "position",
            DocumentKind::EmployeeWithCityView => "employeeWithCity_view",
            DocumentKind::EmployeeWithPositionView => "employeeWithPosition_view",
        }
    }

    /// Returns true for derived view kinds.
    pub fn is_view(&self) -> bool {
        matches!(
            self,
            DocumentKind::EmployeeWithCityView | DocumentKind::EmployeeWithPositionView
        )
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown document type: {s}"))
    }
}

/// A typed document, one variant per [`DocumentKind`].
///
/// Serializes with the `type` tag inlined next to the entity fields, which
/// is the shape the store expects on `post`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Document {
    #[serde(rename = "employee")]
    Employee(Employee),
    #[serde(rename = "city")]
    City(City),
    #[serde(rename = "division")]
    Division(Division),
    #[serde(rename = "position")]
    Position(Position),
    #[serde(rename = "employeeWithCity_view")]
    EmployeeWithCityView(EmployeeWithCityView),
    #[serde(rename = "employeeWithPosition_view")]
    EmployeeWithPositionView(EmployeeWithPositionView),
}

impl Document {
    /// Returns the kind of this document.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Employee(_) => DocumentKind::Employee,
            Document::City(_) => DocumentKind::City,
            Document::Division(_) => DocumentKind::Division,
            Document::Position(_) => DocumentKind::Position,
            Document::EmployeeWithCityView(_) => DocumentKind::EmployeeWithCityView,
            Document::EmployeeWithPositionView(_) => DocumentKind::EmployeeWithPositionView,
        }
    }

    /// Validates raw document data against the schema of `kind`.
    ///
    /// Data fetched by type does not have to carry its own `type` tag, but if
    /// it does the tag must agree with `kind`. Unknown fields are ignored.
    /// The older `uuid`, `cityUuid`, `divisionUuid` and `positionUuid`
    /// spellings are read only where the camelCase field is absent.
    pub fn validate(kind: DocumentKind, data: &Value) -> Result<Document, SchemaViolation> {
        if !data.is_object() {
            return Err(SchemaViolation::NotAnObject { kind });
        }

        if let Some(tag) = data.get("type")
            && tag.as_str() != Some(kind.as_str())
        {
            return Err(SchemaViolation::TypeMismatch {
                expected: kind,
                found: tag.to_string(),
            });
        }

        let data = with_canonical_fields(data);
        let shape = |e: serde_json::Error| SchemaViolation::Shape {
            kind,
            reason: e.to_string(),
        };

        let document = match kind {
            DocumentKind::Employee => Document::Employee(parse(&data).map_err(shape)?),
            DocumentKind::City => Document::City(parse(&data).map_err(shape)?),
            DocumentKind::Division => Document::Division(parse(&data).map_err(shape)?),
            DocumentKind::Position => Document::Position(parse(&data).map_err(shape)?),
            DocumentKind::EmployeeWithCityView => {
                Document::EmployeeWithCityView(parse(&data).map_err(shape)?)
            }
            DocumentKind::EmployeeWithPositionView => {
                Document::EmployeeWithPositionView(parse(&data).map_err(shape)?)
            }
        };
        Ok(document)
    }

    /// Converts the document into a store record carrying its `type` tag.
    pub fn to_record(&self) -> Result<DocumentRecord, serde_json::Error> {
        DocumentRecord::from_serializable(self)
    }
}

/// Older field spellings and the field each one stands in for.
const LEGACY_FIELDS: [(&str, &str); 4] = [
    ("uuid", "id"),
    ("cityUuid", "cityId"),
    ("divisionUuid", "divisionId"),
    ("positionUuid", "positionId"),
];

/// Moves legacy fields onto their camelCase names. The camelCase field wins
/// when both are present; the legacy one is then dropped.
fn with_canonical_fields(data: &Value) -> Cow<'_, Value> {
    let Some(object) = data.as_object() else {
        return Cow::Borrowed(data);
    };
    if !LEGACY_FIELDS
        .iter()
        .any(|(legacy, _)| object.contains_key(*legacy))
    {
        return Cow::Borrowed(data);
    }

    let mut object = object.clone();
    for (legacy, canonical) in LEGACY_FIELDS {
        if let Some(value) = object.remove(legacy)
            && !object.contains_key(canonical)
        {
            object.insert(canonical.to_string(), value);
        }
    }
    Cow::Owned(Value::Object(object))
}

fn parse<T: serde::de::DeserializeOwned>(data: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(data)
}
