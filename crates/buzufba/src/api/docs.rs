//! OpenAPI document and interactive docs

use axum::{Json, Router};
use buzufba_api::{Departure, ErrorResponse, FieldErrors, HealthResponse, Route, RouteName};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api::{routes, system};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MEU BUZUFBA API",
        description = "Simple Web API built to support https://meu-buzufba.vercel.app",
        version = "1.0.0"
    ),
    paths(
        routes::list_routes,
        routes::list_route_names,
        routes::get_route,
        system::health
    ),
    components(schemas(Route, Departure, RouteName, ErrorResponse, FieldErrors, HealthResponse)),
    tags(
        (name = "routes", description = "Bus routes and their departures"),
        (name = "system", description = "Service status")
    )
)]
pub struct ApiDoc;

/// Raw OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Scalar UI served at `/docs`
pub fn scalar<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::from(Scalar::with_url("/docs", ApiDoc::openapi()))
}
