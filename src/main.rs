use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use voxsight::application::services::{PipelineService, UploadPolicy};
use voxsight::infrastructure::observability::{TracingConfig, init_tracing};
use voxsight::infrastructure::openai::{OpenAiSpeechClient, OpenAiVisionClient, OpenAiWhisperEngine};
use voxsight::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::default(), settings.server.port);

    // One HTTP client with the per-call timeout, shared by every adapter.
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.openai.request_timeout_secs))
        .build()?;

    let transcription = Arc::new(OpenAiWhisperEngine::new(
        http_client.clone(),
        settings.openai.api_key.clone(),
        settings.openai.base_url.clone(),
        settings.transcription.model.clone(),
    ));

    let vision = Arc::new(OpenAiVisionClient::new(
        http_client.clone(),
        settings.openai.api_key.clone(),
        settings.openai.base_url.clone(),
        settings.completion.model.clone(),
        settings.completion.max_output_tokens,
        settings.completion.prompt_template.clone(),
    ));

    let synthesizer = settings.synthesis.enabled.then(|| {
        Arc::new(OpenAiSpeechClient::new(
            http_client,
            settings.openai.api_key.clone(),
            settings.openai.base_url.clone(),
            settings.synthesis.model.clone(),
            settings.synthesis.voice.clone(),
        ))
    });

    let pipeline = Arc::new(PipelineService::new(
        transcription,
        vision,
        synthesizer,
        UploadPolicy {
            max_image_bytes: settings.upload.max_image_bytes(),
            enforce_image_format: settings.upload.enforce_image_format,
        },
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;

    let state = AppState { pipeline, settings };
    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
