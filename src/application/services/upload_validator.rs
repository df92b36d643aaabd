use crate::domain::{PipelineRequest, UploadArtifact};

pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Upload limits, fixed at startup. The format check is a deployment
/// toggle; one known deployment runs with it off.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_image_bytes: usize,
    pub enforce_image_format: bool,
}

/// Artifacts that have passed every check a remote stage relies on.
#[derive(Debug)]
pub struct ValidatedUpload {
    pub audio: UploadArtifact,
    pub image: UploadArtifact,
}

/// Display strings double as the HTTP error bodies, so they must stay
/// stable.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Audio or image file is missing")]
    MissingInput,
    #[error("Image file size exceeds {limit_mb} MB")]
    ImageTooLarge { limit_mb: usize },
    #[error("Unsupported image format: {extension}")]
    UnsupportedFormat { extension: String },
}

/// Runs before any remote call. Audio is deliberately not checked for size
/// or format; only the image carries limits.
pub fn validate_upload(
    request: PipelineRequest,
    policy: &UploadPolicy,
) -> Result<ValidatedUpload, ValidationError> {
    let (Some(audio), Some(image)) = (request.audio, request.image) else {
        return Err(ValidationError::MissingInput);
    };

    if image.size_bytes() > policy.max_image_bytes {
        return Err(ValidationError::ImageTooLarge {
            limit_mb: policy.max_image_bytes / (1024 * 1024),
        });
    }

    if policy.enforce_image_format {
        let extension = image.extension().unwrap_or_default();
        if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ValidationError::UnsupportedFormat { extension });
        }
    }

    Ok(ValidatedUpload { audio, image })
}
