use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    DocumentFilter, DocumentId, DocumentRecord, QueryResult, Result, StoredDocument,
    store::{DocumentStore, validate_record_for_post},
};

/// PostgreSQL-backed document store implementation.
///
/// Documents live in a single `documents` table with a JSONB body. Field
/// constraints of a [`DocumentFilter`] are evaluated with JSONB containment.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Creates a new PostgreSQL document store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and returns a store.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_document(row: PgRow) -> Result<StoredDocument> {
        Ok(StoredDocument {
            id: DocumentId::from_uuid(row.try_get::<Uuid, _>("id")?),
            doc_type: row.try_get("doc_type")?,
            created_at: row.try_get("created_at")?,
            data: row.try_get("data")?,
        })
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn query(&self, doc_type: &str, filter: DocumentFilter) -> Result<QueryResult> {
        // `@>` is false for scalar and array rows, so an unconstrained query skips it.
        let containment = (!filter.fields.is_empty()).then(|| filter.fields_as_json());

        let rows = sqlx::query(
            r#"
            SELECT id, doc_type, created_at, data
            FROM documents
            WHERE doc_type = $1 AND ($2::jsonb IS NULL OR data @> $2)
            ORDER BY seq ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(doc_type)
        .bind(containment)
        .bind(filter.limit.map(|l| l as i64))
        .bind(filter.offset.map(|o| o as i64))
        .fetch_all(&self.pool)
        .await?;

        metrics::counter!("document_store_queries", "type" => doc_type.to_string()).increment(1);

        let items = rows
            .into_iter()
            .map(Self::row_to_document)
            .collect::<Result<Vec<_>>>()?;
        Ok(QueryResult::new(items))
    }

    async fn post(&self, record: DocumentRecord) -> Result<()> {
        let doc_type = validate_record_for_post(&record)?.to_string();
        let document = StoredDocument::accept(doc_type.clone(), record);

        sqlx::query(
            r#"
            INSERT INTO documents (id, doc_type, created_at, data)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(document.id.as_uuid())
        .bind(&document.doc_type)
        .bind(document.created_at)
        .bind(&document.data)
        .execute(&self.pool)
        .await?;

        tracing::trace!(doc_type = %doc_type, id = %document.id, "document appended");
        metrics::counter!("document_store_posts", "type" => doc_type).increment(1);
        Ok(())
    }
}
