mod pipeline_service;
mod upload_validator;

pub use pipeline_service::{PipelineError, PipelineService};
pub use upload_validator::{
    ALLOWED_IMAGE_EXTENSIONS, UploadPolicy, ValidatedUpload, ValidationError, validate_upload,
};
