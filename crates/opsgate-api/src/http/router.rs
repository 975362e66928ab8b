//! Axum router configuration with middleware.
//!
//! Admin routes live under `/api/admin/`; `/health` is an unauthenticated
//! liveness probe. Middleware: CORS, tracing.

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method};
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use opsgate_core::security::{ADMIN_HEADER, CSRF_HEADER};

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // No origins are allowed: the admin UI is served from the same origin.
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(ADMIN_HEADER),
            HeaderName::from_static(CSRF_HEADER),
        ]);

    let admin_routes = Router::new()
        .route("/csrf", post(handlers::csrf::issue_csrf_token))
        // Workflows
        .route("/workflows", get(handlers::workflow::list_workflows))
        .route("/workflows/{name}/run", post(handlers::workflow::run_workflow))
        .route(
            "/workflows/{name}/status",
            get(handlers::workflow::get_workflow_status),
        )
        // Health
        .route("/data-health", get(handlers::data_health::get_data_health))
        .route("/health/github", get(handlers::github::get_github_health));

    Router::new()
        .nest("/api/admin", admin_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness probe (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
