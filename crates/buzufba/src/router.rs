//! HTTP router configuration

use std::sync::Arc;

use axum::{Router, http::HeaderValue, routing::get};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::api::{docs, routes, system};
use crate::config::CorsConfig;
use crate::state::AppState;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        // Routes
        .route("/routes", get(routes::list_routes))
        .route("/routes/names", get(routes::list_route_names))
        .route("/routes/{routeId}", get(routes::get_route))
        // System endpoints
        .route("/health", get(system::health))
        // Docs
        .route("/openapi.json", get(docs::openapi_json))
        .merge(docs::scalar())
        .fallback(system::not_found)
        .method_not_allowed_fallback(system::not_found)
        // State
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Build the CORS layer from configuration
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allows_any() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
