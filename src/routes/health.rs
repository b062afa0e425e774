//! Health and service info endpoints

use axum::{extract::State, routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Endpoints listed by the info routes
pub const ENDPOINTS: &[&str] = &[
    "POST /api/fix-homework",
    "POST /api/check-grammar",
    "POST /api/check-writing",
    "POST /api/vocabulary",
    "POST /api/article-vocabulary",
    "GET  /api/motivation",
    "POST /api/generate-quiz",
    "POST /api/quiz-stats",
    "POST /api/study-assistant",
    "POST /api/audio-to-text",
    "POST /api/speaking-feedback",
    "GET  /api/articles",
    "POST /api/article-summary",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub success: bool,
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub providers: Vec<&'static str>,
    pub transcription: bool,
    pub articles: usize,
    pub timestamp: String,
    pub endpoints: &'static [&'static str],
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        status: "OK",
        message: "Server ishlayapti ✅",
        version: env!("CARGO_PKG_VERSION"),
        providers: state.dispatcher().provider_names(),
        transcription: state.transcriber().is_configured(),
        articles: state.articles().len(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        endpoints: ENDPOINTS,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/api/test", get(health_check))
}
