use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{VisionClient, VisionError};
use crate::domain::EncodedImage;
use crate::infrastructure::observability::sanitize_transcript;

/// Chat-completions client that sends one user turn mixing the question
/// text with an inline-encoded image.
pub struct OpenAiVisionClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_output_tokens: usize,
    prompt_template: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OpenAiVisionClient {
    pub fn new(
        client: Client,
        api_key: String,
        base_url: String,
        model: String,
        max_output_tokens: usize,
        prompt_template: String,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
            max_output_tokens,
            prompt_template,
        }
    }

    fn build_user_turn(&self, transcript: &str, image: &EncodedImage) -> ChatMessage {
        let text = self.prompt_template.replace("{transcript}", transcript);
        ChatMessage {
            role: "user".to_string(),
            content: vec![
                ContentPart::Text { text },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image.data_url(),
                    },
                },
            ],
        }
    }
}

#[async_trait]
impl VisionClient for OpenAiVisionClient {
    async fn answer(
        &self,
        transcript: &str,
        image: &EncodedImage,
    ) -> Result<String, VisionError> {
        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![self.build_user_turn(transcript, image)],
            max_tokens: self.max_output_tokens,
        };

        tracing::debug!(
            model = %self.model,
            question = %sanitize_transcript(transcript),
            "Sending completion request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| VisionError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VisionError::Rejected(format!("status {}: {}", status, body)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| VisionError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| VisionError::InvalidResponse("empty choices".to_string()))
    }
}
