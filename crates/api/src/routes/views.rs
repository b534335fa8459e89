//! Materialized view read endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use document_store::DocumentStore;
use projections::{EmployeeWithCity, EmployeeWithPosition, HrApp};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: DocumentStore> {
    pub app: HrApp<S>,
}

impl<S: DocumentStore> AppState<S> {
    pub fn new(app: HrApp<S>) -> Self {
        Self { app }
    }
}

/// GET /views/employees-with-city — every employee with their city name.
#[tracing::instrument(skip(state))]
pub async fn employees_with_city<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<EmployeeWithCity>>, ApiError> {
    Ok(Json(state.app.employee_with_city_list().await?))
}

/// GET /views/employees-with-position — every employee with position and division names.
#[tracing::instrument(skip(state))]
pub async fn employees_with_position<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<EmployeeWithPosition>>, ApiError> {
    Ok(Json(state.app.employee_with_position_list().await?))
}
