//! Error responses for the HTTP API.
//!
//! Bodies follow one shape: `{ "message": ... }`, plus `errors` for
//! validation failures.

use crate::error::ServerError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use principia_core::{ServiceError, ValidationErrors};
use serde_json::json;

/// API error returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Input failed validation (400).
    BadRequest(ValidationErrors),
    /// Requested resource is absent (404).
    NotFound(&'static str),
    /// Store fault (500); the message is generic and safe to expose.
    Internal(&'static str),
}

impl ApiError {
    /// Classifies a server error: validation stays 400, anything else is a
    /// logged 500 carrying `context` as its message.
    pub fn from_server(err: ServerError, context: &'static str) -> Self {
        match err {
            ServerError::Service(ServiceError::Validation(errors)) => Self::BadRequest(errors),
            other => Self::internal(context, &other),
        }
    }

    fn internal(context: &'static str, err: &ServerError) -> Self {
        error!("event=request_failed module=api status=error context=\"{context}\" error={err}");
        Self::Internal(context)
    }

    /// Malformed or mistyped JSON body.
    pub fn from_json_rejection(rejection: JsonRejection) -> Self {
        Self::BadRequest(ValidationErrors::single("body", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Invalid data", "errors": errors })),
            )
                .into_response(),
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            Self::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": message })),
            )
                .into_response(),
        }
    }
}
