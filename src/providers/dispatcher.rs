//! Fallback dispatcher
//!
//! Providers are attempted one after another, never in parallel. The first
//! successful text is returned and later providers are not called. Quota
//! errors fall through exactly like transport errors; there is no retry
//! with delay inside a single provider.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::ProvidersConfig;
use crate::ocr::OcrService;

use super::types::{DispatchError, GenerateRequest, GenerativeProvider, ProviderFailure};
use super::{AnthropicProvider, GeminiProvider, GroqProvider};

/// OCR output shorter than this is treated as an unreadable image
pub const MIN_OCR_CHARS: usize = 10;

pub struct FallbackDispatcher {
    providers: Vec<Arc<dyn GenerativeProvider>>,
    ocr: Arc<OcrService>,
}

impl FallbackDispatcher {
    pub fn new(providers: Vec<Arc<dyn GenerativeProvider>>, ocr: Arc<OcrService>) -> Self {
        Self { providers, ocr }
    }

    /// Build the chain from configuration, skipping providers without a key
    pub fn from_config(config: &ProvidersConfig, ocr: Arc<OcrService>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client ({}), using defaults", e);
                Client::new()
            });

        let mut providers: Vec<Arc<dyn GenerativeProvider>> = Vec::new();

        if let Some(key) = &config.gemini.api_key {
            providers.push(Arc::new(GeminiProvider::new(client.clone(), key, &config.gemini)));
        }
        if let Some(key) = &config.groq.api_key {
            providers.push(Arc::new(GroqProvider::new(client.clone(), key, &config.groq)));
        }
        if let Some(key) = &config.anthropic.api_key {
            providers.push(Arc::new(AnthropicProvider::new(client, key, &config.anthropic)));
        }

        if providers.is_empty() {
            tracing::warn!("No AI provider API keys configured; AI endpoints will fail");
        }

        Self::new(providers, ocr)
    }

    /// Names of the configured providers in priority order
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.kind().as_str()).collect()
    }

    /// Send a text prompt through the chain
    pub async fn dispatch(&self, prompt: &str, max_output_tokens: u32) -> Result<String, DispatchError> {
        self.dispatch_request(&GenerateRequest::text(prompt, max_output_tokens))
            .await
    }

    /// Send a prepared text request through the chain
    ///
    /// Any image on the request is ignored; use
    /// [`dispatch_with_image`](Self::dispatch_with_image) for images.
    pub async fn dispatch_request(&self, request: &GenerateRequest) -> Result<String, DispatchError> {
        let text_request;
        let request = if request.image.is_some() {
            text_request = GenerateRequest {
                image: None,
                ..request.clone()
            };
            &text_request
        } else {
            request
        };

        let mut failures = Vec::new();

        for provider in &self.providers {
            match provider.generate(request).await {
                Ok(text) => {
                    tracing::info!(
                        provider = %provider.kind(),
                        failed_before = failures.len(),
                        "AI provider answered"
                    );
                    return Ok(text);
                }
                Err(error) => {
                    tracing::warn!("AI provider {} failed: {}, trying next", provider.kind(), error);
                    failures.push(ProviderFailure {
                        provider: provider.kind(),
                        error,
                    });
                }
            }
        }

        let err = DispatchError::AllProvidersFailed { failures };
        tracing::error!("{}", err);
        Err(err)
    }

    /// Send a prompt with an image
    ///
    /// Only the vision provider sees the image. When it is missing or fails,
    /// the image goes through local OCR and the recognized text is appended
    /// to the prompt, which then runs through the text-only chain.
    pub async fn dispatch_with_image(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
        max_output_tokens: u32,
    ) -> Result<String, DispatchError> {
        if let Some(vision) = self.providers.iter().find(|p| p.supports_images()) {
            let request = GenerateRequest::text(prompt, max_output_tokens)
                .with_image(image.to_vec(), mime_type);

            match vision.generate(&request).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    tracing::warn!("Vision provider {} failed: {}, falling back to OCR", vision.kind(), e);
                }
            }
        } else {
            tracing::warn!("No vision provider configured, falling back to OCR");
        }

        let recognized = match self.ocr.recognize(image, mime_type).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("OCR rescue failed: {}", e);
                return Err(DispatchError::UnreadableImage);
            }
        };

        if recognized.meaningful_chars() < MIN_OCR_CHARS {
            tracing::warn!(
                "OCR produced only {} characters, treating image as unreadable",
                recognized.meaningful_chars()
            );
            return Err(DispatchError::UnreadableImage);
        }

        tracing::info!(
            "OCR rescue via {:?} recognized {} characters",
            recognized.provider,
            recognized.text.len()
        );

        let rescued_prompt = splice_ocr_text(prompt, &recognized.text);
        self.dispatch(&rescued_prompt, max_output_tokens).await
    }
}

fn splice_ocr_text(prompt: &str, recognized: &str) -> String {
    format!(
        "{}\n\n📝 TEXT RECOGNIZED FROM THE IMAGE:\n{}",
        prompt.trim_end(),
        recognized.trim()
    )
}
