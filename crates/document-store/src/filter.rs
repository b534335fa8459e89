use serde_json::{Map, Value};

/// Filter applied to a typed store query.
///
/// The default filter is unconstrained and fetches every document of the
/// requested type. Field constraints are top-level equality matches against
/// the document data; how they are evaluated is up to each store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    /// Top-level fields that must equal the given values.
    pub fields: Map<String, Value>,

    /// Maximum number of documents to return.
    pub limit: Option<usize>,

    /// Number of documents to skip.
    pub offset: Option<usize>,
}

impl DocumentFilter {
    /// Creates an unconstrained filter.
    pub fn all() -> Self {
        Self::default()
    }

    /// Requires `field` to equal `value`.
    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Limits the number of documents returned.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips this many documents before returning results.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns true if this filter places no constraint at all.
    pub fn is_unconstrained(&self) -> bool {
        self.fields.is_empty() && self.limit.is_none() && self.offset.is_none()
    }

    /// Returns true if `data` satisfies every field constraint.
    ///
    /// Limit and offset are not considered here.
    pub fn matches(&self, data: &Value) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| data.get(field) == Some(expected))
    }

    /// Returns the field constraints as a JSON object.
    pub fn fields_as_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
