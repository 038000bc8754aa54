use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse<'a> {
    status: &'static str,
    model: &'a str,
    version: &'static str,
}

/// Liveness only; the remote model is not probed so health checks cost nothing.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy",
        model: &state.config.gemini_model,
        version: env!("CARGO_PKG_VERSION"),
    };

    (StatusCode::OK, Json(response)).into_response()
}
