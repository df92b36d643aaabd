mod artifact;
mod pipeline;

pub use artifact::{MediaKind, UploadArtifact};
pub use pipeline::{EncodedImage, PipelineRequest, PipelineResponse};
