use async_trait::async_trait;

use crate::domain::EncodedImage;

/// Remote multimodal completion capability: answers a transcribed question
/// in the context of one inline-encoded image.
#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn answer(
        &self,
        transcript: &str,
        image: &EncodedImage,
    ) -> Result<String, VisionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("completion service unreachable: {0}")]
    Unavailable(String),
    #[error("completion request rejected: {0}")]
    Rejected(String),
    #[error("invalid completion response: {0}")]
    InvalidResponse(String),
}
