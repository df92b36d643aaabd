use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{SpeechSynthesizer, TranscriptionEngine, VisionClient};
use crate::domain::{MediaKind, PipelineRequest, PipelineResponse, UploadArtifact};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ProcessResponse {
    pub response_text: String,
    pub speech_mp3: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn process_handler<T, V, S>(
    State(state): State<AppState<T, V, S>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    T: TranscriptionEngine + 'static,
    V: VisionClient + 'static,
    S: SpeechSynthesizer + 'static,
{
    let mut request = PipelineRequest::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        let kind = match field.name() {
            Some("audio") => MediaKind::Audio,
            Some("image") => MediaKind::Image,
            _ => continue,
        };
        let filename = field.file_name().map(String::from);

        let data = match field.bytes().await {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read file bytes");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read file: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        tracing::debug!(kind = ?kind, bytes = data.len(), "File field received");

        let artifact = UploadArtifact::new(kind, filename, data);
        match kind {
            MediaKind::Audio => request.audio = Some(artifact),
            MediaKind::Image => request.image = Some(artifact),
        }
    }

    match state.pipeline.run(request).await {
        Ok(PipelineResponse {
            response_text,
            speech_mp3: Some(speech_mp3),
        }) => {
            tracing::info!("Pipeline completed with speech");
            (
                StatusCode::OK,
                Json(ProcessResponse {
                    response_text,
                    speech_mp3,
                }),
            )
                .into_response()
        }
        Ok(PipelineResponse {
            response_text,
            speech_mp3: None,
        }) => {
            tracing::info!("Pipeline completed");
            (StatusCode::OK, response_text).into_response()
        }
        Err(e) if e.is_client_error() => {
            tracing::warn!(error = %e, "Upload rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Pipeline failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
