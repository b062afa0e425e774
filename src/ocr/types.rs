//! OCR Types

use serde::{Deserialize, Serialize};

/// OCR provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrProvider {
    /// Tesseract OCR (local)
    Tesseract,
    /// Ollama vision model (local LLM)
    Ollama,
}

impl Default for OcrProvider {
    fn default() -> Self {
        Self::Tesseract
    }
}

/// OCR result
#[derive(Debug, Clone, Serialize)]
pub struct OcrResult {
    /// Recognized text
    pub text: String,
    /// Provider used
    pub provider: OcrProvider,
}

impl OcrResult {
    /// Number of non-whitespace characters in the recognized text
    pub fn meaningful_chars(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count()
    }
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR provider not available: {0}")]
    ProviderNotAvailable(String),

    #[error("OCR processing failed: {0}")]
    ProcessingError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meaningful_chars_and_shape() {
        let result = OcrResult {
            text: " 2 + 2\n= 4 ".to_string(),
            provider: OcrProvider::Ollama,
        };
        assert_eq!(result.meaningful_chars(), 5);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({ "text": " 2 + 2\n= 4 ", "provider": "ollama" }));
    }
}
