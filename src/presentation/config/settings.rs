use serde::Deserialize;

/// Default prompt wording as observed in production; deployments override
/// it through `COMPLETION_PROMPT_TEMPLATE`. `{transcript}` is substituted
/// with the spoken question.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Here's the question: {transcript}. \
Make the response quick and concise. ONLY and ONLY tell what the main thing \
the image is or what I asked for. Make it human like and make it maximum 2-3 \
sentences of a response unless more is needed.";

/// Immutable process configuration, built once at startup and shared by
/// reference. No component reads the environment after this point.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub openai: OpenAiSettings,
    pub transcription: TranscriptionSettings,
    pub completion: CompletionSettings,
    pub synthesis: SynthesisSettings,
    pub upload: UploadSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionSettings {
    pub model: String,
    pub max_output_tokens: usize,
    pub prompt_template: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisSettings {
    pub enabled: bool,
    pub model: String,
    pub voice: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_image_size_mb: usize,
    pub enforce_image_format: bool,
}

impl UploadSettings {
    pub fn max_image_bytes(&self) -> usize {
        self.max_image_size_mb * 1024 * 1024
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: env_parsed("SERVER_PORT", 3000),
            },
            openai: OpenAiSettings {
                api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
                base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                request_timeout_secs: env_parsed("OPENAI_REQUEST_TIMEOUT_SECS", 120),
            },
            transcription: TranscriptionSettings {
                model: env_or("TRANSCRIPTION_MODEL", "whisper-1"),
            },
            completion: CompletionSettings {
                model: env_or("COMPLETION_MODEL", "gpt-4o"),
                max_output_tokens: env_parsed("COMPLETION_MAX_OUTPUT_TOKENS", 50),
                prompt_template: env_or("COMPLETION_PROMPT_TEMPLATE", DEFAULT_PROMPT_TEMPLATE),
            },
            synthesis: SynthesisSettings {
                enabled: env_flag("SYNTHESIS_ENABLED", true),
                model: env_or("SYNTHESIS_MODEL", "tts-1"),
                voice: env_or("SYNTHESIS_VOICE", "alloy"),
            },
            upload: UploadSettings {
                max_image_size_mb: env_parsed("MAX_IMAGE_SIZE_MB", 10),
                enforce_image_format: env_flag("ENFORCE_IMAGE_FORMAT", false),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v.to_lowercase() == "true" || v == "1")
        .unwrap_or(default)
}
