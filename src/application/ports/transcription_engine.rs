use async_trait::async_trait;

use crate::domain::UploadArtifact;

/// Remote speech-to-text capability. Returns the service's text output
/// verbatim; an empty transcript (silence) is valid, not an error.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio: &UploadArtifact) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription service unreachable: {0}")]
    Unavailable(String),
    #[error("transcription request rejected: {0}")]
    Rejected(String),
    #[error("invalid transcription response: {0}")]
    InvalidResponse(String),
}
