/**
 * Router Configuration
 *
 * Public routes (`/health`, sign-up, sign-in) are merged with the API
 * routes, which are wrapped in the auth middleware. Tracing and CORS
 * layers apply to everything; unknown paths get a JSON 404.
 */

use axum::{
    extract::State,
    http::Uri,
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::auth::{sign_in, sign_up};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth_middleware;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// GET /health
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "store": state.store.kind(),
    }))
}

async fn not_found(uri: Uri) -> BackendError {
    BackendError::not_found("route", uri.path())
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let protected = configure_api_routes(Router::new())
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health))
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
        .merge(protected)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
