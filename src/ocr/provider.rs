//! OCR Providers
//!
//! Defines the provider trait and implementations for different OCR backends.

use async_trait::async_trait;
use tokio::process::Command;

use super::types::{OcrError, OcrProvider, OcrResult};

/// OCR provider trait
#[async_trait]
pub trait OcrProviderTrait: Send + Sync {
    /// Get the provider type
    fn provider_type(&self) -> OcrProvider;

    /// Check if the provider is available
    async fn is_available(&self) -> bool;

    /// Perform OCR on an encoded image
    async fn recognize(&self, image_data: &[u8], mime_type: &str) -> Result<OcrResult, OcrError>;
}

/// Tesseract OCR provider backed by the `tesseract` executable
pub struct TesseractProvider {
    /// Language list passed to `-l`
    languages: String,
}

impl TesseractProvider {
    pub fn new(languages: &str) -> Self {
        Self {
            languages: languages.to_string(),
        }
    }
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        _ => "png",
    }
}

#[async_trait]
impl OcrProviderTrait for TesseractProvider {
    fn provider_type(&self) -> OcrProvider {
        OcrProvider::Tesseract
    }

    async fn is_available(&self) -> bool {
        Command::new("tesseract")
            .arg("--version")
            .output()
            .await
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    async fn recognize(&self, image_data: &[u8], mime_type: &str) -> Result<OcrResult, OcrError> {
        let input_path = std::env::temp_dir().join(format!(
            "ocr_input_{}.{}",
            uuid::Uuid::new_v4(),
            extension_for(mime_type)
        ));

        tokio::fs::write(&input_path, image_data)
            .await
            .map_err(|e| OcrError::ProcessingError(format!("Failed to write temp file: {}", e)))?;

        // "stdout" as output base makes tesseract print the text instead of writing a file
        let output = Command::new("tesseract")
            .arg(&input_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.languages)
            .arg("--psm")
            .arg("3")
            .output()
            .await;

        let _ = tokio::fs::remove_file(&input_path).await;

        let output = output
            .map_err(|e| OcrError::ProcessingError(format!("Failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "Tesseract failed: {}",
                stderr.trim()
            )));
        }

        Ok(OcrResult {
            text: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            provider: OcrProvider::Tesseract,
        })
    }
}

/// Ollama vision model provider
pub struct OllamaProvider {
    client: reqwest::Client,
    /// Ollama API URL
    base_url: String,
    /// Model name (e.g., "llava", "bakllava")
    model: String,
}

impl OllamaProvider {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl OcrProviderTrait for OllamaProvider {
    fn provider_type(&self) -> OcrProvider {
        OcrProvider::Ollama
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn recognize(&self, image_data: &[u8], _mime_type: &str) -> Result<OcrResult, OcrError> {
        use base64::Engine;

        let url = format!("{}/api/generate", self.base_url);
        let image_base64 = base64::engine::general_purpose::STANDARD.encode(image_data);

        let request = serde_json::json!({
            "model": self.model,
            "prompt": "Extract all text from this image exactly as written. Return only the extracted text, nothing else.",
            "images": [image_base64],
            "stream": false
        });

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| OcrError::ApiError(format!("Failed to call Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::ApiError(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| OcrError::ApiError(format!("Failed to parse response: {}", e)))?;

        let text = result["response"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        Ok(OcrResult {
            text,
            provider: OcrProvider::Ollama,
        })
    }
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    pub response: Result<OcrResult, String>,
    pub available: bool,
}

#[cfg(test)]
impl MockProvider {
    pub fn returning(text: &str) -> Self {
        Self {
            response: Ok(OcrResult {
                text: text.to_string(),
                provider: OcrProvider::Tesseract,
            }),
            available: true,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            available: true,
        }
    }
}

#[cfg(test)]
#[async_trait]
impl OcrProviderTrait for MockProvider {
    fn provider_type(&self) -> OcrProvider {
        OcrProvider::Tesseract
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn recognize(&self, _image_data: &[u8], _mime_type: &str) -> Result<OcrResult, OcrError> {
        self.response
            .clone()
            .map_err(OcrError::ProcessingError)
    }
}
