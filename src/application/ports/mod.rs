mod speech_synthesizer;
mod transcription_engine;
mod vision_client;

pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use vision_client::{VisionClient, VisionError};
