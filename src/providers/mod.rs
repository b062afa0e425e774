//! AI provider adapters and the fallback dispatcher
//!
//! Every backend implements [`GenerativeProvider`]. The
//! [`FallbackDispatcher`] walks the configured providers in priority order
//! and returns the first generated text:
//!
//! 1. Gemini (accepts images)
//! 2. Groq (OpenAI-compatible chat completions)
//! 3. Anthropic Messages API
//!
//! Image submissions only go to the vision provider; when it fails the
//! image is run through local OCR and the recognized text re-enters the
//! text-only chain.

mod anthropic;
mod dispatcher;
mod gemini;
mod groq;
mod types;

pub use anthropic::AnthropicProvider;
pub use dispatcher::FallbackDispatcher;
pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use types::{
    DispatchError, GenerateRequest, GenerativeProvider, ImageInput, ProviderError,
    ProviderFailure, ProviderKind,
};

#[cfg(test)]
pub use types::mock::{MockOutcome, MockProvider};
