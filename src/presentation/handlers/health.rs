use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Free-form greeting kept for clients that probe the root path.
pub async fn index_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"Server Running": "Welcome to your favourite server!"})),
    )
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}
