use super::{
    handlers::{describe, docs, health, index},
    middleware::{logging::logging_middleware, request_id::request_id_middleware},
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::{services::ServeFile, trace::TraceLayer};

pub fn create_router(state: AppState) -> Router {
    let branding = ServeFile::new(&state.config.branding_image_path);
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Form page
        .route("/", get(index::form_page))
        .route_service("/static/pic.png", branding)
        // Health
        .route("/health", get(health::health_check))
        // Describe
        .route(
            "/api/v1/describe",
            post(describe::describe_product).layer(DefaultBodyLimit::max(body_limit)),
        )
        // Docs
        .route("/api/v1/docs", get(docs::api_docs))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
