//! Grammar and writing evaluation endpoints

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::formatter::format_response;
use crate::prompts::{self, Language};
use crate::state::AppState;

use super::{optional_field, require_field, ApiJson};

const GRAMMAR_MAX_TOKENS: u32 = 3096;
const WRITING_MAX_TOKENS: u32 = 4096;

/// Essays shorter than this are not evaluated
pub const MIN_WRITING_WORDS: usize = 50;

#[derive(Debug, Deserialize)]
pub struct GrammarRequest {
    pub text: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingRequest {
    pub text: Option<String>,
    pub language: Option<String>,
    pub task_type: Option<String>,
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GrammarResponse {
    pub success: bool,
    pub result: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingResponse {
    pub success: bool,
    pub result: String,
    pub word_count: usize,
}

async fn check_grammar(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GrammarRequest>,
) -> Result<Json<GrammarResponse>> {
    let language = Language::from_code(request.language.as_deref());
    let text = require_field(language, "text", request.text)?;

    let raw = state
        .dispatcher()
        .dispatch(&prompts::grammar(language, &text), GRAMMAR_MAX_TOKENS)
        .await?;

    Ok(Json(GrammarResponse {
        success: true,
        result: format_response(&raw),
    }))
}

async fn check_writing(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<WritingRequest>,
) -> Result<Json<WritingResponse>> {
    let language = Language::from_code(request.language.as_deref());
    let text = require_field(language, "text", request.text)?;

    let word_count = text.split_whitespace().count();
    if word_count < MIN_WRITING_WORDS {
        return Err(AppError::BadRequest(language.too_short(word_count, MIN_WRITING_WORDS)));
    }

    let task_type = optional_field(request.task_type);
    let topic = optional_field(request.topic);
    tracing::info!("Evaluating {} word essay ({:?})", word_count, task_type);

    let prompt = prompts::writing(language, &text, task_type.as_deref(), topic.as_deref());
    let raw = state.dispatcher().dispatch(&prompt, WRITING_MAX_TOKENS).await?;

    Ok(Json(WritingResponse {
        success: true,
        result: format_response(&raw),
        word_count,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/check-grammar", post(check_grammar))
        .route("/api/check-writing", post(check_writing))
}
