use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{SpeechSynthesizer, TranscriptionEngine, VisionClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{health_handler, index_handler, process_handler};
use crate::presentation::state::AppState;

pub fn create_router<T, V, S>(state: AppState<T, V, S>) -> Router
where
    T: TranscriptionEngine + 'static,
    V: VisionClient + 'static,
    S: SpeechSynthesizer + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // The validator owns the image size ceiling and audio is deliberately
    // unbounded, so axum's 2 MB default body cap must not run first.
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/process", post(process_handler::<T, V, S>))
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
