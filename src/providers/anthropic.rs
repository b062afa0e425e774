//! Anthropic Messages API adapter (text only in the fallback chain)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ProviderSettings;

use super::types::{ensure_success, GenerateRequest, GenerativeProvider, ProviderError, ProviderKind};

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicProvider {
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
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl GenerativeProvider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderError> {
        if request.image.is_some() {
            return Err(ProviderError::ImagesUnsupported);
        }

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_output_tokens,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
        };

        tracing::debug!("Calling Anthropic model {}", self.model);
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }
}
