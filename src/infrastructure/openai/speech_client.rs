use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

pub struct OpenAiSpeechClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    voice: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
}

impl OpenAiSpeechClient {
    pub fn new(
        client: Client,
        api_key: String,
        base_url: String,
        model: String,
        voice: String,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
            voice,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeechClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        let request_body = SpeechRequest {
            model: &self.model,
            voice: &self.voice,
            input: text,
        };

        tracing::debug!(model = %self.model, voice = %self.voice, chars = text.len(), "Sending synthesis request");

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SynthesisError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Rejected(format!(
                "status {}: {}",
                status, body
            )));
        }

        // Buffer the whole stream; a partial payload must never reach the
        // caller.
        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;

        tracing::info!(bytes = audio.len(), "Synthesis completed");

        Ok(audio.to_vec())
    }
}
