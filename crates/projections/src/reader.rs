//! Read accessors over the materialized views.

use document_store::{DocumentFilter, DocumentStore, QueryResult};
use domain::DocumentKind;
use serde_json::Value;

use crate::views::{EmployeeWithCity, EmployeeWithPosition};
use crate::{ProjectionError, Result};

/// Serves precomputed view rows in their caller-facing shapes.
///
/// Rows that lack a required field are dropped rather than reported; a
/// store failure fails the whole read.
pub struct ViewReader<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DocumentStore + ?Sized> ViewReader<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Returns every employee-with-city row, in store order.
    #[tracing::instrument(skip(self))]
    pub async fn employees_with_city(&self) -> Result<Vec<EmployeeWithCity>> {
        let result = self.fetch(DocumentKind::EmployeeWithCityView).await?;
        Ok(project_rows(
            DocumentKind::EmployeeWithCityView,
            &result,
            EmployeeWithCity::from_view_data,
        ))
    }

    /// Returns every employee-with-position row, in store order.
    #[tracing::instrument(skip(self))]
    pub async fn employees_with_position(&self) -> Result<Vec<EmployeeWithPosition>> {
        let result = self.fetch(DocumentKind::EmployeeWithPositionView).await?;
        Ok(project_rows(
            DocumentKind::EmployeeWithPositionView,
            &result,
            EmployeeWithPosition::from_view_data,
        ))
    }

    async fn fetch(&self, view: DocumentKind) -> Result<QueryResult> {
        self.store
            .query(view.as_str(), DocumentFilter::all())
            .await
            .map_err(|source| ProjectionError::Read { view, source })
    }
}

fn project_rows<T>(
    view: DocumentKind,
    result: &QueryResult,
    project: impl Fn(&Value) -> Option<T>,
) -> Vec<T> {
    let rows: Vec<T> = result
        .items
        .iter()
        .filter_map(|item| project(&item.data))
        .collect();

    let dropped = result.len() - rows.len();
    if dropped > 0 {
        tracing::debug!(%view, dropped, "filtered malformed view rows");
        metrics::counter!("views_malformed_rows_filtered", "view" => view.as_str())
            .increment(dropped as u64);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use document_store::{DocumentStoreExt, InMemoryDocumentStore};
    use serde_json::json;

    #[tokio::test]
    async fn reads_city_rows_in_store_order() {
        let store = InMemoryDocumentStore::new();
        for (id, name, city) in [("e1", "Ann", "Almaty"), ("e2", "Bo", "Astana")] {
            store
                .post_json(json!({"type": "employeeWithCity_view", "id": id, "firstName": name, "city": city}))
                .await
                .unwrap();
        }

        let rows = ViewReader::new(&store).employees_with_city().await.unwrap();

        assert_eq!(
            rows,
            vec![
                EmployeeWithCity {
                    first_name: "Ann".to_string(),
                    city: "Almaty".to_string()
                },
                EmployeeWithCity {
                    first_name: "Bo".to_string(),
                    city: "Astana".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn malformed_rows_are_omitted_not_errors() {
        let store = InMemoryDocumentStore::new();
        store
            .post_json(json!({"type": "employeeWithPosition_view", "id": "e1", "firstName": "Ann", "position": "Dev", "division": "IT"}))
            .await
            .unwrap();
        store
            .post_json(json!({"type": "employeeWithPosition_view", "id": "e2", "firstName": "Bo", "position": "Dev"}))
            .await
            .unwrap();
        store.insert_raw("employeeWithPosition_view", json!("garbage")).await;

        let rows = ViewReader::new(&store)
            .employees_with_position()
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].first_name, "Ann");
    }

    #[tokio::test]
    async fn empty_view_is_empty_list() {
        let store = InMemoryDocumentStore::new();
        let reader = ViewReader::new(&store);

        assert!(reader.employees_with_city().await.unwrap().is_empty());
        assert!(reader.employees_with_position().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn query_failure_is_wrapped_with_view_name() {
        let store = InMemoryDocumentStore::new();
        store.fail_queries_of_type("employeeWithCity_view").await;

        let err = ViewReader::new(&store)
            .employees_with_city()
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProjectionError::Read {
                view: DocumentKind::EmployeeWithCityView,
                ..
            }
        ));
        assert!(
            err.to_string()
                .starts_with("Failed to fetch employeeWithCity_view list")
        );
    }
}
