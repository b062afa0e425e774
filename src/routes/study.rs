//! Study assistant endpoint

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::formatter::format_response;
use crate::prompts::{self, Language, StudyMode};
use crate::state::AppState;

use super::{require_field, ApiJson};

const STUDY_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Deserialize)]
pub struct StudyRequest {
    pub mode: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StudyResponse {
    pub success: bool,
    pub result: String,
    pub mode: StudyMode,
}

async fn study_assistant(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<StudyRequest>,
) -> Result<Json<StudyResponse>> {
    let language = Language::from_code(request.language.as_deref());
    let mode_name = require_field(language, "mode", request.mode)?;
    let mode = StudyMode::parse(&mode_name)
        .ok_or_else(|| AppError::BadRequest(language.invalid_value("mode", &mode_name)))?;
    let content = require_field(language, "content", request.content)?;

    let raw = state
        .dispatcher()
        .dispatch(&prompts::study(language, mode, &content), STUDY_MAX_TOKENS)
        .await?;

    Ok(Json(StudyResponse {
        success: true,
        result: format_response(&raw),
        mode,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/study-assistant", post(study_assistant))
}
