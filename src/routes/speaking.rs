//! Speaking feedback endpoint

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formatter::format_response;
use crate::prompts::{self, ExamType, Language};
use crate::state::AppState;

use super::{optional_field, require_field, ApiJson};

const SPEAKING_MAX_TOKENS: u32 = 3072;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakingRequest {
    pub transcript: Option<String>,
    pub topic: Option<String>,
    pub exam_type: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakingResponse {
    pub success: bool,
    pub result: String,
    pub exam_type: ExamType,
}

async fn speaking_feedback(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SpeakingRequest>,
) -> Result<Json<SpeakingResponse>> {
    let language = Language::from_code(request.language.as_deref());
    let transcript = require_field(language, "transcript", request.transcript)?;
    let topic = optional_field(request.topic);
    let exam_type = ExamType::parse(request.exam_type.as_deref());

    let prompt = prompts::speaking(language, &transcript, topic.as_deref(), exam_type);
    let raw = state.dispatcher().dispatch(&prompt, SPEAKING_MAX_TOKENS).await?;

    Ok(Json(SpeakingResponse {
        success: true,
        result: format_response(&raw),
        exam_type,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/speaking-feedback", post(speaking_feedback))
}
