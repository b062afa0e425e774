//! Groq adapter over the OpenAI-compatible chat completions API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ProviderSettings;

use super::types::{ensure_success, GenerateRequest, GenerativeProvider, ProviderError, ProviderKind};

pub struct GroqProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqProvider {
    pub fn new(client: Client, api_key: impl Into<String>, settings: &ProviderSettings) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[async_trait]
impl GenerativeProvider for GroqProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderError> {
        if request.image.is_some() {
            return Err(ProviderError::ImagesUnsupported);
        }

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
        };

        tracing::debug!("Calling Groq model {}", self.model);
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }
}
