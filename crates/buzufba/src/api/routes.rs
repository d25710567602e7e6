//! Bus route endpoints

use std::sync::Arc;

use axum::{Json, extract::State};
use buzufba_api::{ErrorResponse, Route, RouteName};
use buzufba_core::RouteIdParams;

use crate::api::error::AppError;
use crate::api::extract::{ValidPath, ValidQuery};
use crate::state::AppState;

/// Get all routes
///
/// Every route with its departures, ordered by route id.
///
/// # Errors
/// Returns `AppError` if the route store fails
#[utoipa::path(
    get,
    path = "/routes",
    tag = "routes",
    responses(
        (status = 200, description = "All routes", body = Vec<Route>),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn list_routes(
    State(state): State<Arc<AppState>>,
    ValidQuery(()): ValidQuery<()>,
) -> Result<Json<Vec<Route>>, AppError> {
    let routes = state.routes.list_routes().await?;
    Ok(Json(routes))
}

/// Get all route names
///
/// # Errors
/// Returns `AppError` if the route store fails
#[utoipa::path(
    get,
    path = "/routes/names",
    tag = "routes",
    responses(
        (status = 200, description = "Id and name of every route", body = Vec<RouteName>),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn list_route_names(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RouteName>>, AppError> {
    let names = state.routes.list_route_names().await?;
    Ok(Json(names))
}

/// Get a route by id
///
/// # Errors
/// Returns `AppError` if the id is invalid, unknown, or the route store fails
#[utoipa::path(
    get,
    path = "/routes/{routeId}",
    tag = "routes",
    params(("routeId" = i32, Path, description = "Route identifier")),
    responses(
        (status = 200, description = "The route with its departures", body = Route),
        (status = 400, description = "Invalid route id", body = ErrorResponse),
        (status = 404, description = "Unknown route id", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn get_route(
    State(state): State<Arc<AppState>>,
    ValidPath(params): ValidPath<RouteIdParams>,
) -> Result<Json<Route>, AppError> {
    let route = state.routes.get_route(params.route_id).await?;
    Ok(Json(route))
}
