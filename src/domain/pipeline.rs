use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::artifact::UploadArtifact;

/// The unit of work: one audio clip paired with one image. Fields are
/// optional so that a missing part is the validator's decision, not the
/// transport layer's.
#[derive(Debug, Default)]
pub struct PipelineRequest {
    pub audio: Option<UploadArtifact>,
    pub image: Option<UploadArtifact>,
}

/// What the pipeline hands back on success. `speech_mp3` is present only
/// when the synthesis stage is enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResponse {
    pub response_text: String,
    pub speech_mp3: Option<String>,
}

/// An image base64-encoded exactly once, tagged with its media type so it
/// can travel inline as a data URL. Encoding the same bytes always yields
/// the same payload.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub media_type: &'static str,
    pub base64: String,
}

impl EncodedImage {
    pub fn from_artifact(artifact: &UploadArtifact) -> Self {
        let media_type = match artifact.extension().as_deref() {
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            // jpeg is what the upstream vision API assumes when in doubt
            _ => "image/jpeg",
        };

        Self {
            media_type,
            base64: BASE64.encode(&artifact.bytes),
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.base64)
    }
}
