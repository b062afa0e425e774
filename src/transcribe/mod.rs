//! Speech-to-text through Groq's Whisper-compatible endpoint

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ProviderSettings;

/// Uploads larger than this are rejected before any network call
pub const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

pub const DEFAULT_TRANSCRIBE_MODEL: &str = "whisper-large-v3";

#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("transcription service is not configured")]
    NotConfigured,

    #[error("audio file is empty")]
    EmptyAudio,

    #[error("audio file is {size} bytes, over the 25 MB limit")]
    TooLarge { size: usize },

    #[error("invalid audio part: {0}")]
    InvalidPart(String),

    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("transcription API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transcription is empty")]
    EmptyTranscript,
}

impl From<reqwest::Error> for TranscribeError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.without_url())
    }
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

pub struct Transcriber {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl Transcriber {
    /// Reuses the Groq credentials; without a key every call fails with `NotConfigured`
    pub fn new(client: Client, settings: &ProviderSettings) -> Self {
        Self {
            client,
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: DEFAULT_TRANSCRIBE_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
        mime_type: &str,
    ) -> Result<String, TranscribeError> {
        let api_key = self.api_key.as_deref().ok_or(TranscribeError::NotConfigured)?;

        if audio.is_empty() {
            return Err(TranscribeError::EmptyAudio);
        }
        if audio.len() > MAX_AUDIO_BYTES {
            return Err(TranscribeError::TooLarge { size: audio.len() });
        }

        let size = audio.len();
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| TranscribeError::InvalidPart(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "json");

        tracing::debug!("Sending {} bytes of audio for transcription", size);

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Transcription API error: {} - {}", status, body);
            return Err(TranscribeError::Status { status, body });
        }

        let parsed: TranscriptionResponse = response.json().await?;
        let text = parsed.text.trim();
        if text.is_empty() {
            return Err(TranscribeError::EmptyTranscript);
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_not_configured() {
        let transcriber = Transcriber::new(Client::new(), &Config::default().providers.groq);
        assert!(!transcriber.is_configured());
        let err = transcriber
            .transcribe(vec![1, 2, 3], "a.webm", "audio/webm")
            .await
            .unwrap_err();
        assert!(matches!(err, TranscribeError::NotConfigured));
    }

    #[tokio::test]
    async fn test_size_checked_before_request() {
        let mut settings = Config::default().providers.groq;
        settings.api_key = Some("key".to_string());
        settings.base_url = "http://127.0.0.1:1".to_string();
        let transcriber = Transcriber::new(Client::new(), &settings);

        let err = transcriber
            .transcribe(vec![0; MAX_AUDIO_BYTES + 1], "a.mp3", "audio/mpeg")
            .await
            .unwrap_err();
        assert!(matches!(err, TranscribeError::TooLarge { .. }));

        let err = transcriber.transcribe(Vec::new(), "a.mp3", "audio/mpeg").await.unwrap_err();
        assert!(matches!(err, TranscribeError::EmptyAudio));
    }
}
