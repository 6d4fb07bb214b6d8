//! HTTP API routes, middleware and handlers.

use crate::state::AppState;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post};
use axum::Router;
use log::{info, warn};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

pub mod errors;
pub mod health;
pub mod principles;
pub mod tactics;

/// Build the router for all API endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/principles",
            get(principles::list_principles).post(principles::create_principle),
        )
        .route(
            "/principles/:id",
            get(principles::get_principle).delete(principles::delete_principle),
        )
        .route("/tactics", post(tactics::create_tactic))
        .route("/tactics/:id", delete(tactics::delete_tactic))
        .route("/health", get(health::health_check))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            seed_on_first_request,
        ))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Seeds an empty store before the first request is handled.
async fn seed_on_first_request(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    state.ensure_seeded().await;
    next.run(request).await
}

async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let code = response.status();
    let duration_ms = started_at.elapsed().as_millis();
    if code.is_server_error() {
        warn!(
            "event=http_request module=api status=error method={method} path={path} http_status={} duration_ms={duration_ms}",
            code.as_u16()
        );
    } else {
        info!(
            "event=http_request module=api status=ok method={method} path={path} http_status={} duration_ms={duration_ms}",
            code.as_u16()
        );
    }
    response
}

/// Parses a path id; `None` for anything that is not a UUID.
pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
