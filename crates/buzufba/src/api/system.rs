//! Health and fallback endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{Method, Uri},
};
use buzufba_api::{ErrorResponse, HealthResponse};
use buzufba_core::NotFoundError;

use crate::api::error::AppError;
use crate::state::AppState;

/// Health check
///
/// # Errors
/// Returns `AppError` if the route store does not answer
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service and route store are up", body = HealthResponse),
        (status = 500, description = "Route store unreachable", body = ErrorResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, AppError> {
    state.routes.health().await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// Answer requests that match no route
pub async fn not_found(method: Method, uri: Uri) -> AppError {
    NotFoundError::new(format!("Route {method}:{} not found", uri.path())).into()
}
