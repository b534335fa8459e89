//! Normalized entity write endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use document_store::DocumentStore;
use domain::UpdateRequest;
use serde::Serialize;

use super::views::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct UpdateAcceptedResponse {
    pub status: &'static str,
    pub entity: String,
}

/// POST /entities — accept an update to a normalized entity.
///
/// The request is validated and acknowledged; nothing is written.
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UpdateAcceptedResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let kind = request.entity.document_kind();

    state.app.update(request).await?;
    metrics::counter!("entity_updates_accepted", "entity" => kind.as_str()).increment(1);

    Ok((
        StatusCode::ACCEPTED,
        Json(UpdateAcceptedResponse {
            status: "accepted",
            entity: kind.to_string(),
        }),
    ))
}
