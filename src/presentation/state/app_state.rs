use std::sync::Arc;

use crate::application::ports::{SpeechSynthesizer, TranscriptionEngine, VisionClient};
use crate::application::services::PipelineService;
use crate::presentation::config::Settings;

pub struct AppState<T, V, S>
where
    T: TranscriptionEngine,
    V: VisionClient,
    S: SpeechSynthesizer,
{
    pub pipeline: Arc<PipelineService<T, V, S>>,
    pub settings: Settings,
}

impl<T, V, S> Clone for AppState<T, V, S>
where
    T: TranscriptionEngine,
    V: VisionClient,
    S: SpeechSynthesizer,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            settings: self.settings.clone(),
        }
    }
}
