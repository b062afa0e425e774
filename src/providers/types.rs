//! Provider types shared by all adapters

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

/// Identifies a backend in logs and error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Groq,
    Anthropic,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Groq => "groq",
            Self::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline image attached to a generation request
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// A single generation call
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
    pub temperature: Option<f32>,
    pub image: Option<ImageInput>,
}

impl GenerateRequest {
    pub fn text(prompt: impl Into<String>, max_output_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_output_tokens,
            temperature: None,
            image: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_image(mut self, data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        self.image = Some(ImageInput {
            data,
            mime_type: mime_type.into(),
        });
        self
    }
}

/// A generative text backend
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Whether `generate` accepts `GenerateRequest::image`
    fn supports_images(&self) -> bool {
        false
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderError>;
}

/// Failure of a single provider call
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("quota exhausted: {0}")]
    QuotaExceeded(String),

    #[error("response contained no text")]
    EmptyResponse,

    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    #[error("provider does not accept images")]
    ImagesUnsupported,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        // Request URLs may carry credentials
        Self::Network(e.without_url())
    }
}

impl ProviderError {
    /// Classify a non-success response; 429 and quota markers become `QuotaExceeded`
    pub(crate) fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || body.contains("RESOURCE_EXHAUSTED")
            || body.contains("rate_limit_error")
            || body.contains("insufficient_quota")
        {
            Self::QuotaExceeded(format!("HTTP {}", status.as_u16()))
        } else {
            Self::Status {
                status: status.as_u16(),
                body: truncate(&body, 300),
            }
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars).collect();
        out.push('…');
        out
    }
}

/// Read a response, mapping non-2xx status to a provider error
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::from_status(status, body))
}

/// One recorded failure inside the fallback chain
#[derive(Debug)]
pub struct ProviderFailure {
    pub provider: ProviderKind,
    pub error: ProviderError,
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

/// Terminal failure of the dispatcher
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("all AI providers failed [{}]", join_failures(.failures))]
    AllProvidersFailed { failures: Vec<ProviderFailure> },

    #[error("no readable text found in the image")]
    UnreadableImage,
}

impl DispatchError {
    /// Remediation message shown to the client
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::AllProvidersFailed { .. } => {
                "AI xizmatlari hozirda band. Iltimos, birozdan keyin qaytadan urinib ko'ring."
            }
            Self::UnreadableImage => {
                "Rasmdagi matnni o'qib bo'lmadi. Iltimos, vazifani matn ko'rinishida yuboring."
            }
        }
    }
}

fn join_failures(failures: &[ProviderFailure]) -> String {
    if failures.is_empty() {
        return "no providers configured".to_string();
    }
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
