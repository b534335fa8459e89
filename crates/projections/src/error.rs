//! Projection error types.

use document_store::DocumentStoreError;
use domain::DocumentKind;
use thiserror::Error;

/// Errors that can occur while loading, materializing or reading views.
///
/// Every variant that wraps a [`DocumentStoreError`] names the phase the
/// store call belonged to. Schema violations and unresolved references are
/// handled locally and never appear here.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Querying a reference data type failed.
    #[error("Failed to load reference data ({kind}): {source}")]
    ReferenceLoad {
        kind: DocumentKind,
        #[source]
        source: DocumentStoreError,
    },

    /// Querying employees for materialization failed.
    #[error("Failed to build materialized views: employee query failed: {0}")]
    EmployeeQuery(#[source] DocumentStoreError),

    /// One or more view writes were rejected by the store.
    ///
    /// Writes that succeeded before or alongside the rejected ones stay
    /// persisted.
    #[error(
        "Failed to build materialized views: {failed} of {attempted} writes rejected, first: {first}"
    )]
    WritesRejected {
        attempted: usize,
        failed: usize,
        #[source]
        first: DocumentStoreError,
    },

    /// A view row could not be encoded as a store record.
    #[error("Failed to encode view row: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Querying a view failed.
    #[error("Failed to fetch {view} list: {source}")]
    Read {
        view: DocumentKind,
        #[source]
        source: DocumentStoreError,
    },

    /// Reference loading or materialization failed during initialization.
    #[error("Initialization failed: {0}")]
    Initialization(#[source] Box<ProjectionError>),

    /// A read was attempted before initialization succeeded.
    #[error("Application is not initialized")]
    NotReady,

    /// `initialize` was called on an application that is already ready.
    #[error("Application is already initialized")]
    AlreadyInitialized,
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
