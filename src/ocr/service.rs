//! OCR Service
//!
//! Orchestrates OCR providers in configured order.

use std::sync::Arc;

use crate::config::OcrConfig;

use super::{
    provider::{OcrProviderTrait, OllamaProvider, TesseractProvider},
    types::{OcrError, OcrProvider, OcrResult},
};

/// OCR service used by the image rescue path
pub struct OcrService {
    providers: Vec<Arc<dyn OcrProviderTrait>>,
}

impl OcrService {
    /// Create a new OCR service from configuration
    pub fn new(config: &OcrConfig) -> Self {
        let mut providers: Vec<Arc<dyn OcrProviderTrait>> = Vec::new();

        for kind in &config.providers {
            match kind {
                OcrProvider::Tesseract => {
                    providers.push(Arc::new(TesseractProvider::new(&config.languages)))
                }
                OcrProvider::Ollama => providers.push(Arc::new(OllamaProvider::new(
                    &config.ollama_url,
                    &config.ollama_model,
                ))),
            }
        }

        Self { providers }
    }

    /// Create a service over an explicit provider list
    pub fn with_providers(providers: Vec<Arc<dyn OcrProviderTrait>>) -> Self {
        Self { providers }
    }

    /// Get available providers
    pub async fn available_providers(&self) -> Vec<OcrProvider> {
        let mut available = Vec::new();
        for provider in &self.providers {
            if provider.is_available().await {
                available.push(provider.provider_type());
            }
        }
        available
    }

    /// Recognize text in an image, first working provider wins
    pub async fn recognize(&self, image_data: &[u8], mime_type: &str) -> Result<OcrResult, OcrError> {
        for provider in &self.providers {
            if !provider.is_available().await {
                tracing::debug!("OCR provider {:?} unavailable, skipping", provider.provider_type());
                continue;
            }

            match provider.recognize(image_data, mime_type).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    tracing::warn!(
                        "OCR provider {:?} failed: {}, trying next",
                        provider.provider_type(),
                        e
                    );
                }
            }
        }

        Err(OcrError::ProviderNotAvailable(
            "No OCR providers available".to_string(),
        ))
    }
}
