//! Reading article endpoints

use std::sync::LazyLock;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::articles::Article;
use crate::error::{AppError, Result};
use crate::formatter::format_response;
use crate::prompts::{self, Language};
use crate::state::AppState;

use super::{optional_field, require_field, ApiJson};

const SUMMARY_MAX_TOKENS: u32 = 2048;

static SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)SCORE:?\s*\**\s*(\d{1,2})\s*/\s*10").expect("score pattern is valid")
});

#[derive(Debug, Serialize)]
pub struct ArticlesResponse<'a> {
    pub success: bool,
    pub articles: &'a [Article],
    pub count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub article: Option<String>,
    /// Catalog id, used when `article` is not sent
    pub article_id: Option<String>,
    pub user_summary: Option<String>,
    pub article_title: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub success: bool,
    pub feedback: String,
    pub score: Option<u8>,
}

/// Read `SCORE: N/10` from the model answer
pub fn parse_summary_score(raw: &str) -> Option<u8> {
    let captures = SCORE.captures(raw)?;
    let score: u8 = captures.get(1)?.as_str().parse().ok()?;
    (score <= 10).then_some(score)
}

async fn list_articles(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let articles = state.articles().articles();
    let body = serde_json::to_value(ArticlesResponse {
        success: true,
        articles,
        count: articles.len(),
    })
    .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(body))
}

async fn article_summary(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SummaryRequest>,
) -> Result<Json<SummaryResponse>> {
    let language = Language::from_code(request.language.as_deref());
    let user_summary = require_field(language, "userSummary", request.user_summary)?;
    let mut title = optional_field(request.article_title);

    let article = match optional_field(request.article) {
        Some(article) => article,
        None => {
            let id = require_field(language, "article", request.article_id)?;
            let found = state
                .articles()
                .get(&id)
                .ok_or_else(|| AppError::NotFound(language.invalid_value("articleId", &id)))?;
            title.get_or_insert_with(|| found.title.clone());
            found.content.clone()
        }
    };

    let prompt = prompts::article_summary(language, title.as_deref(), &article, &user_summary);
    let raw = state.dispatcher().dispatch(&prompt, SUMMARY_MAX_TOKENS).await?;

    let score = parse_summary_score(&raw);
    if score.is_none() {
        tracing::warn!("Summary feedback had no SCORE line");
    }

    Ok(Json(SummaryResponse {
        success: true,
        feedback: format_response(&raw),
        score,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/articles", get(list_articles))
        .route("/api/article-summary", post(article_summary))
}
