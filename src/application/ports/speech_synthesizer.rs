use async_trait::async_trait;

/// Remote text-to-speech capability. Implementations must buffer the full
/// audio stream before returning; callers never see a partial payload.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("synthesis service unreachable: {0}")]
    Unavailable(String),
    #[error("synthesis request rejected: {0}")]
    Rejected(String),
    #[error("invalid synthesis response: {0}")]
    InvalidResponse(String),
}
