//! Core view projection trait and the missing-reference diagnostic.

use common::EntityId;
use domain::{Document, DocumentKind, Employee};

use crate::cache::{ReferenceDataCache, ReferenceKind};

/// An employee reference that did not resolve in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub kind: ReferenceKind,
    pub id: EntityId,
}

/// Every unresolved reference that kept a view row from being produced.
///
/// This is a diagnostic, not an error: the materializer logs it and skips
/// the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReference {
    pub employee_id: EntityId,
    pub unresolved: Vec<UnresolvedReference>,
}

impl MissingReference {
    pub fn new(employee_id: EntityId) -> Self {
        Self {
            employee_id,
            unresolved: Vec::new(),
        }
    }

    /// Records an unresolved reference.
    pub fn push(&mut self, kind: ReferenceKind, id: &EntityId) {
        self.unresolved.push(UnresolvedReference {
            kind,
            id: id.clone(),
        });
    }
}

impl std::fmt::Display for MissingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "employee {} references unknown", self.employee_id)?;
        for (i, reference) in self.unresolved.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{} {}", reference.kind, reference.id)?;
        }
        Ok(())
    }
}

/// A denormalized view derived from employees joined with reference data.
///
/// A projection either produces the complete view row for an employee or
/// reports every reference it could not resolve. Partial rows are never
/// produced.
pub trait ViewProjection: Send + Sync {
    /// Returns the name of this projection.
    fn name(&self) -> &'static str;

    /// Returns the document kind of the rows this projection produces.
    fn view_kind(&self) -> DocumentKind;

    /// Joins one employee against the cache.
    fn project(
        &self,
        employee: &Employee,
        cache: &ReferenceDataCache,
    ) -> Result<Document, MissingReference>;
}
