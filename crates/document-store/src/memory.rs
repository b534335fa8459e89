use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    DocumentFilter, DocumentRecord, DocumentStoreError, QueryResult, Result, StoredDocument,
    store::{DocumentStore, validate_record_for_post},
};

/// Document types for which the store refuses operations.
#[derive(Debug, Default)]
struct Faults {
    failing_posts: HashSet<String>,
    failing_queries: HashSet<String>,
}

/// In-memory document store implementation.
///
/// Documents are kept in insertion order. The store can be told to reject
/// posts or queries for specific document types, which makes it useful for
/// exercising failure paths in tests.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<Vec<StoredDocument>>>,
    faults: Arc<RwLock<Faults>>,
}

impl InMemoryDocumentStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of documents stored.
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Returns the number of documents stored under a type.
    pub async fn count_of_type(&self, doc_type: &str) -> usize {
        self.documents
            .read()
            .await
            .iter()
            .filter(|d| d.doc_type == doc_type)
            .count()
    }

    /// Inserts a document under an explicit type, bypassing the `type` tag check.
    ///
    /// Useful for seeding documents whose data does not carry its own tag,
    /// or for simulating corrupted rows.
    pub async fn insert_raw(&self, doc_type: &str, data: serde_json::Value) {
        self.documents
            .write()
            .await
            .push(StoredDocument::accept(doc_type, DocumentRecord::new(data)));
    }

    /// Makes every subsequent post of `doc_type` fail.
    pub async fn fail_posts_of_type(&self, doc_type: impl Into<String>) {
        self.faults.write().await.failing_posts.insert(doc_type.into());
    }

    /// Makes every subsequent query of `doc_type` fail.
    pub async fn fail_queries_of_type(&self, doc_type: impl Into<String>) {
        self.faults
            .write()
            .await
            .failing_queries
            .insert(doc_type.into());
    }

    /// Removes all injected faults.
    pub async fn clear_faults(&self) {
        let mut faults = self.faults.write().await;
        faults.failing_posts.clear();
        faults.failing_queries.clear();
    }

    /// Clears all documents.
    pub async fn clear(&self) {
        self.documents.write().await.clear();
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn query(&self, doc_type: &str, filter: DocumentFilter) -> Result<QueryResult> {
        if self.faults.read().await.failing_queries.contains(doc_type) {
            return Err(DocumentStoreError::Unavailable(format!(
                "query of type {doc_type} rejected"
            )));
        }

        let store = self.documents.read().await;
        let offset = filter.offset.unwrap_or(0);
        let limit = filter.limit.unwrap_or(usize::MAX);

        let items: Vec<_> = store
            .iter()
            .filter(|d| d.doc_type == doc_type && filter.matches(&d.data))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        metrics::counter!("document_store_queries", "type" => doc_type.to_string()).increment(1);
        Ok(QueryResult::new(items))
    }

    async fn post(&self, record: DocumentRecord) -> Result<()> {
        let doc_type = validate_record_for_post(&record)?.to_string();

        if self.faults.read().await.failing_posts.contains(&doc_type) {
            return Err(DocumentStoreError::Unavailable(format!(
                "post of type {doc_type} rejected"
            )));
        }

        self.documents
            .write()
            .await
            .push(StoredDocument::accept(doc_type.clone(), record));

        metrics::counter!("document_store_posts", "type" => doc_type).increment(1);
        Ok(())
    }
}
