//! Principle endpoints.

use super::errors::ApiError;
use super::parse_id;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use principia_core::{Principle, PrincipleDraft, PrincipleWithTactics};
use std::sync::Arc;

const PRINCIPLE_NOT_FOUND: &str = "Principle not found";

/// `GET /principles`
pub async fn list_principles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrincipleWithTactics>>, ApiError> {
    let principles = state
        .with_service(|service| service.list_principles())
        .await
        .map_err(|err| ApiError::from_server(err, "Failed to fetch principles"))?;
    Ok(Json(principles))
}

/// `GET /principles/:id`; ids that are not UUIDs cannot exist and are 404.
pub async fn get_principle(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<PrincipleWithTactics>, ApiError> {
    let Some(id) = parse_id(&raw_id) else {
        return Err(ApiError::NotFound(PRINCIPLE_NOT_FOUND));
    };

    let found = state
        .with_service(move |service| service.get_principle(id))
        .await
        .map_err(|err| ApiError::from_server(err, "Failed to fetch principle"))?;
    found.map(Json).ok_or(ApiError::NotFound(PRINCIPLE_NOT_FOUND))
}

/// `POST /principles`
pub async fn create_principle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PrincipleDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Principle>), ApiError> {
    let Json(draft) = payload.map_err(ApiError::from_json_rejection)?;
    let created = state
        .with_service(move |service| service.create_principle(draft))
        .await
        .map_err(|err| ApiError::from_server(err, "Failed to create principle"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `DELETE /principles/:id`; absent ids succeed silently.
pub async fn delete_principle(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let Some(id) = parse_id(&raw_id) else {
        return Ok(StatusCode::NO_CONTENT);
    };

    state
        .with_service(move |service| service.delete_principle(id))
        .await
        .map_err(|err| ApiError::from_server(err, "Failed to delete principle"))?;
    Ok(StatusCode::NO_CONTENT)
}
