use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::translate::translate_handler;

pub fn create_routes(state: &AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/api/health", get(health_check))
        .route(
            "/api/translate",
            post(translate_handler).layer(DefaultBodyLimit::disable()),
        );

    match &state.config.system_config.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Full application: routes, CORS and request tracing.
pub fn build_app(state: AppState) -> Router {
    create_routes(&state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
