mod speech_client;
mod vision_client;
mod whisper_engine;

pub use speech_client::OpenAiSpeechClient;
pub use vision_client::OpenAiVisionClient;
pub use whisper_engine::OpenAiWhisperEngine;
