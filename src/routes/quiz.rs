//! Quiz generation and scoring endpoints

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::prompts::{self, Difficulty, Language};
use crate::providers::GenerateRequest;
use crate::quiz::{extract_quiz, quiz_stats, QuizQuestion, MAX_QUESTIONS, MIN_QUESTIONS};
use crate::state::AppState;

use super::{require_field, ApiJson};

const QUIZ_MAX_TOKENS: u32 = 4096;
const QUIZ_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    pub article: Option<String>,
    pub question_count: Option<u32>,
    pub difficulty: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizResponse {
    pub success: bool,
    pub questions: Vec<QuizQuestion>,
    pub total_questions: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStatsRequest {
    pub score: Option<u32>,
    pub total_questions: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct QuizStatsResponse {
    pub success: bool,
    pub message: &'static str,
    pub emoji: &'static str,
    pub percentage: u32,
}

async fn generate_quiz(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateQuizRequest>,
) -> Result<Json<GenerateQuizResponse>> {
    let language = Language::from_code(request.language.as_deref());
    let article = require_field(language, "article", request.article)?;

    let count = request
        .question_count
        .filter(|count| (MIN_QUESTIONS..=MAX_QUESTIONS).contains(count));
    let Some(count) = count else {
        return Err(AppError::BadRequest(
            language.question_count_range(MIN_QUESTIONS, MAX_QUESTIONS),
        ));
    };

    let difficulty = Difficulty::parse(request.difficulty.as_deref());
    let prompt = prompts::quiz(language, &article, count, difficulty);
    let request = GenerateRequest::text(prompt, QUIZ_MAX_TOKENS).with_temperature(QUIZ_TEMPERATURE);

    let raw = state.dispatcher().dispatch_request(&request).await?;
    let questions = extract_quiz(&raw)?;

    tracing::info!("Generated {} of {} requested quiz questions", questions.len(), count);

    Ok(Json(GenerateQuizResponse {
        success: true,
        total_questions: questions.len(),
        questions,
    }))
}

async fn stats(ApiJson(request): ApiJson<QuizStatsRequest>) -> Result<Json<QuizStatsResponse>> {
    let language = Language::default();
    let score = request
        .score
        .ok_or_else(|| AppError::BadRequest(language.missing("score")))?;
    let total = request
        .total_questions
        .ok_or_else(|| AppError::BadRequest(language.missing("totalQuestions")))?;

    let stats = quiz_stats(score, total).ok_or_else(|| {
        AppError::BadRequest(language.invalid_value("score", &format!("{}/{}", score, total)))
    })?;

    Ok(Json(QuizStatsResponse {
        success: true,
        message: stats.message,
        emoji: stats.emoji,
        percentage: stats.percentage,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/generate-quiz", post(generate_quiz))
        .route("/api/quiz-stats", post(stats))
}
