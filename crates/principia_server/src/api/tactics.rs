//! Tactic endpoints.

use super::errors::ApiError;
use super::parse_id;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use principia_core::{Tactic, TacticDraft};
use std::sync::Arc;

/// `POST /tactics`; an unknown `principleId` is a 400, not a 500.
pub async fn create_tactic(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TacticDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Tactic>), ApiError> {
    let Json(draft) = payload.map_err(ApiError::from_json_rejection)?;
    let created = state
        .with_service(move |service| service.create_tactic(draft))
        .await
        .map_err(|err| ApiError::from_server(err, "Failed to create tactic"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `DELETE /tactics/:id`
pub async fn delete_tactic(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let Some(id) = parse_id(&raw_id) else {
        return Ok(StatusCode::NO_CONTENT);
    };

    state
        .with_service(move |service| service.delete_tactic(id))
        .await
        .map_err(|err| ApiError::from_server(err, "Failed to delete tactic"))?;
    Ok(StatusCode::NO_CONTENT)
}
