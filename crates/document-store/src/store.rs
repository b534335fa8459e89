use async_trait::async_trait;

use crate::{DocumentFilter, DocumentRecord, DocumentStoreError, QueryResult, Result};

/// Core trait for document store implementations.
///
/// Both operations are asynchronous and independent: the store gives no
/// ordering or atomicity guarantee across calls, and `post` always appends
/// (two records with the same `id` field become two documents).
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns the documents of `doc_type` that satisfy `filter`.
    ///
    /// Documents are returned in insertion order.
    async fn query(&self, doc_type: &str, filter: DocumentFilter) -> Result<QueryResult>;

    /// Appends a record. The document type is read from `record.data.type`.
    async fn post(&self, record: DocumentRecord) -> Result<()>;
}

/// Extension trait providing convenience methods for document stores.
#[async_trait]
pub trait DocumentStoreExt: DocumentStore {
    /// Fetches every document of a type.
    async fn query_all(&self, doc_type: &str) -> Result<QueryResult> {
        self.query(doc_type, DocumentFilter::all()).await
    }

    /// Appends a record built from raw JSON data.
    async fn post_json(&self, data: serde_json::Value) -> Result<()> {
        self.post(DocumentRecord::new(data)).await
    }

    /// Counts the documents of a type.
    async fn count(&self, doc_type: &str) -> Result<usize> {
        Ok(self.query_all(doc_type).await?.len())
    }
}

// Blanket implementation for all DocumentStore implementations
impl<T: DocumentStore + ?Sized> DocumentStoreExt for T {}

/// Validates a record before it is appended and returns its type tag.
pub fn validate_record_for_post(record: &DocumentRecord) -> Result<&str> {
    match record.doc_type() {
        Some(doc_type) if !doc_type.is_empty() => Ok(doc_type),
        _ => Err(DocumentStoreError::MissingTypeTag),
    }
}
