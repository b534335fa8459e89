//! Domain error types.

use thiserror::Error;

use crate::DocumentKind;

/// A fetched document that does not match the schema of its kind.
///
/// Consumers treat this as "not a document of that kind" and skip the
/// record; it is never surfaced to callers as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    /// The document body is not a JSON object.
    #[error("{kind} document is not a JSON object")]
    NotAnObject { kind: DocumentKind },

    /// The document carries a `type` tag for a different kind.
    #[error("expected {expected} document, found type tag {found}")]
    TypeMismatch {
        expected: DocumentKind,
        found: String,
    },

    /// A required field is missing or has the wrong primitive type.
    #[error("{kind} document does not match its schema: {reason}")]
    Shape { kind: DocumentKind, reason: String },
}

impl SchemaViolation {
    /// Returns the kind the document was validated against.
    pub fn kind(&self) -> DocumentKind {
        match self {
            SchemaViolation::NotAnObject { kind } | SchemaViolation::Shape { kind, .. } => *kind,
            SchemaViolation::TypeMismatch { expected, .. } => *expected,
        }
    }
}
