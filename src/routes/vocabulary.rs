//! Word lookup endpoints

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formatter::format_response;
use crate::prompts::{self, Language};
use crate::state::AppState;

use super::{require_field, ApiJson};

const VOCABULARY_MAX_TOKENS: u32 = 2048;
const ARTICLE_VOCABULARY_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Deserialize)]
pub struct VocabularyRequest {
    pub word: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VocabularyResponse {
    pub success: bool,
    pub result: String,
    pub word: String,
}

async fn vocabulary(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VocabularyRequest>,
) -> Result<Json<VocabularyResponse>> {
    let language = Language::from_code(request.language.as_deref());
    let word = require_field(language, "word", request.word)?;

    let raw = state
        .dispatcher()
        .dispatch(&prompts::vocabulary(language, &word), VOCABULARY_MAX_TOKENS)
        .await?;

    Ok(Json(VocabularyResponse {
        success: true,
        result: format_response(&raw),
        word,
    }))
}

async fn article_vocabulary(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VocabularyRequest>,
) -> Result<Json<VocabularyResponse>> {
    let language = Language::from_code(request.language.as_deref());
    let word = require_field(language, "word", request.word)?;

    let raw = state
        .dispatcher()
        .dispatch(
            &prompts::article_vocabulary(language, &word),
            ARTICLE_VOCABULARY_MAX_TOKENS,
        )
        .await?;

    Ok(Json(VocabularyResponse {
        success: true,
        result: format_response(&raw),
        word,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/vocabulary", post(vocabulary))
        .route("/api/article-vocabulary", post(article_vocabulary))
}
