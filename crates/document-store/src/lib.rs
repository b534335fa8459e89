//! Document store contract consumed by the materialized-view core.
//!
//! The store is an append/query collaborator: documents are grouped by a
//! string `type` tag, fetched by type plus a store-defined filter, and
//! appended one record at a time. No update-by-id or delete is exposed.

pub mod document;
pub mod error;
pub mod filter;
pub mod memory;
pub mod postgres;
pub mod store;

pub use document::{DocumentId, DocumentRecord, QueryResult, StoredDocument};
pub use error::{DocumentStoreError, Result};
pub use filter::DocumentFilter;
pub use memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use store::{DocumentStore, DocumentStoreExt};
