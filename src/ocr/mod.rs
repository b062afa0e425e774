//! OCR Module
//!
//! Local text recognition used to rescue image submissions when the
//! vision-capable AI provider is unavailable.
//!
//! Supports multiple backends:
//! - Tesseract (local CLI, requires installation)
//! - Ollama vision models (local LLM)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ziyoai_server::ocr::OcrService;
//!
//! let service = OcrService::new(&config.ocr);
//! let result = service.recognize(&image_bytes, "image/png").await?;
//! println!("{}", result.text);
//! ```

mod provider;
mod service;
mod types;

pub use provider::{OcrProviderTrait, OllamaProvider, TesseractProvider};
pub use service::OcrService;
pub use types::{OcrError, OcrProvider, OcrResult};

#[cfg(test)]
pub use provider::MockProvider;
