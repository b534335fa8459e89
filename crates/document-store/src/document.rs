use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned identifier of a persisted document.
///
/// This is unrelated to any `id` field inside the document data; the store
/// never deduplicates on the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Creates a new random document ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a document ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record handed to [`DocumentStore::post`](crate::DocumentStore::post).
///
/// The document type is carried inside `data` under the `type` key, the same
/// way it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub data: serde_json::Value,
}

impl DocumentRecord {
    /// Wraps raw JSON data.
    pub fn new(data: serde_json::Value) -> Self {
        Self { data }
    }

    /// Serializes a value into a record.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            data: serde_json::to_value(value)?,
        })
    }

    /// Returns the `type` tag of the record, if present and a string.
    pub fn doc_type(&self) -> Option<&str> {
        self.data.get("type").and_then(serde_json::Value::as_str)
    }
}

/// A document as returned by a store query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Store-assigned identifier.
    pub id: DocumentId,

    /// The type tag the document was posted under.
    pub doc_type: String,

    /// When the store accepted the document.
    pub created_at: DateTime<Utc>,

    /// The document body, including its `type` tag.
    pub data: serde_json::Value,
}

impl StoredDocument {
    /// Builds a stored document from an accepted record.
    pub fn accept(doc_type: impl Into<String>, record: DocumentRecord) -> Self {
        Self {
            id: DocumentId::new(),
            doc_type: doc_type.into(),
            created_at: Utc::now(),
            data: record.data,
        }
    }
}

/// Result of a store query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub items: Vec<StoredDocument>,
}

impl QueryResult {
    pub fn new(items: Vec<StoredDocument>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
