//! Audio transcription endpoint

use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::transcribe::TranscribeError;

use super::ApiMultipart;

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub success: bool,
    pub transcript: String,
}

async fn audio_to_text(
    State(state): State<AppState>,
    ApiMultipart(mut multipart): ApiMultipart,
) -> Result<Json<TranscriptResponse>> {
    if !state.transcriber().is_configured() {
        return Err(TranscribeError::NotConfigured.into());
    }

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("audio") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("audio.webm").to_string();
        let mime_type = field.content_type().unwrap_or("audio/webm").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        tracing::info!("Transcribing {} ({}, {} bytes)", file_name, mime_type, data.len());

        let transcript = state
            .transcriber()
            .transcribe(data.to_vec(), &file_name, &mime_type)
            .await?;

        return Ok(Json(TranscriptResponse {
            success: true,
            transcript,
        }));
    }

    Err(AppError::BadRequest("Audio fayl yuborilmadi ('audio' maydoni)".to_string()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/audio-to-text", post(audio_to_text))
}
