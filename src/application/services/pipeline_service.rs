use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::application::ports::{
    SpeechSynthesizer, SynthesisError, TranscriptionEngine, TranscriptionError, VisionClient,
    VisionError,
};
use crate::domain::{EncodedImage, PipelineRequest, PipelineResponse};

use super::upload_validator::{UploadPolicy, ValidationError, validate_upload};

/// Orchestrates the fixed validate → transcribe → complete → synthesize
/// chain. The only component that knows the dependency order; adapters
/// know nothing about each other.
pub struct PipelineService<T, V, S>
where
    T: TranscriptionEngine,
    V: VisionClient,
    S: SpeechSynthesizer,
{
    transcription: Arc<T>,
    vision: Arc<V>,
    synthesizer: Option<Arc<S>>,
    policy: UploadPolicy,
}

impl<T, V, S> PipelineService<T, V, S>
where
    T: TranscriptionEngine + 'static,
    V: VisionClient,
    S: SpeechSynthesizer,
{
    pub fn new(
        transcription: Arc<T>,
        vision: Arc<V>,
        synthesizer: Option<Arc<S>>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            transcription,
            vision,
            synthesizer,
            policy,
        }
    }

    pub async fn run(&self, request: PipelineRequest) -> Result<PipelineResponse, PipelineError> {
        let validated = validate_upload(request, &self.policy)?;

        // Encode once; the completion stage reuses this buffer untouched.
        let image = EncodedImage::from_artifact(&validated.image);
        tracing::debug!(
            image_bytes = validated.image.size_bytes(),
            audio_bytes = validated.audio.size_bytes(),
            "Upload validated, image encoded"
        );

        // Transcription has no upstream dependency inside the pipeline, so
        // it runs as its own task. Nothing else useful can overlap with it
        // in this topology; the seam exists for future fan-out.
        let transcription = Arc::clone(&self.transcription);
        let audio = validated.audio;
        let transcript = tokio::spawn(async move { transcription.transcribe(&audio).await })
            .await
            .map_err(|e| PipelineError::TaskFailed(e.to_string()))??;

        tracing::debug!(chars = transcript.len(), "Transcription stage completed");

        // Hard dependency: completion needs the transcript.
        let response_text = self.vision.answer(&transcript, &image).await?;

        tracing::debug!(chars = response_text.len(), "Completion stage completed");

        // Hard dependency: synthesis needs the answer. Optional stage.
        let speech_mp3 = match &self.synthesizer {
            Some(synthesizer) => {
                let speech = synthesizer.synthesize(&response_text).await?;
                tracing::debug!(bytes = speech.len(), "Synthesis stage completed");
                Some(BASE64.encode(speech))
            }
            None => None,
        };

        Ok(PipelineResponse {
            response_text,
            speech_mp3,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("completion: {0}")]
    Completion(#[from] VisionError),
    #[error("synthesis: {0}")]
    Synthesis(#[from] SynthesisError),
    #[error("transcription task failed: {0}")]
    TaskFailed(String),
}

impl PipelineError {
    /// Validation failures are the caller's fault; everything else is an
    /// upstream problem.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }
}
