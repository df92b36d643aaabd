mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CompletionSettings, DEFAULT_PROMPT_TEMPLATE, OpenAiSettings, ServerSettings, Settings,
    SynthesisSettings, TranscriptionSettings, UploadSettings,
};
