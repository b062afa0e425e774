//! Error types for the ZiyoAI server

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::providers::DispatchError;
use crate::quiz::QuizError;
use crate::transcribe::TranscribeError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation failure; the message is already localized
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error(transparent)]
    Transcribe(#[from] TranscribeError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Noto'g'ri JSON so'rov: {}", rejection.body_text()))
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(format!(
            "Noto'g'ri multipart so'rov: {}",
            rejection.body_text()
        ))
    }
}

/// Error envelope shared by every endpoint
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Serverda xatolik yuz berdi".to_string(),
                    None,
                )
            }
            AppError::Dispatch(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                e.user_message().to_string(),
                Some(e.to_string()),
            ),
            AppError::Quiz(e) => {
                tracing::error!("Quiz extraction failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Test yaratishda xatolik. Iltimos, qaytadan urinib ko'ring.".to_string(),
                    Some(e.to_string()),
                )
            }
            AppError::Transcribe(e) => match e {
                TranscribeError::NotConfigured => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Ovozni matnga aylantirish xizmati sozlanmagan".to_string(),
                    None,
                ),
                TranscribeError::EmptyAudio | TranscribeError::TooLarge { .. } => (
                    StatusCode::BAD_REQUEST,
                    "Audio fayl bo'sh yoki 25MB dan katta".to_string(),
                    Some(e.to_string()),
                ),
                _ => {
                    tracing::error!("Transcription failed: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Ovozni matnga aylantirib bo'lmadi".to_string(),
                        Some(e.to_string()),
                    )
                }
            },
        };

        let body = Json(ErrorResponse {
            success: false,
            error,
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_envelope() {
        let (status, json) = body_json(AppError::BadRequest("Matn kerak".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Matn kerak");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn test_dispatch_failure_carries_details() {
        let err = AppError::from(DispatchError::AllProvidersFailed { failures: Vec::new() });
        let (status, json) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["details"].as_str().unwrap().contains("no providers configured"));
    }

    #[tokio::test]
    async fn test_transcription_not_configured_is_503() {
        let (status, _) = body_json(TranscribeError::NotConfigured.into()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_quiz_error_details() {
        let (status, json) = body_json(QuizError::NoValidQuestions.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["details"], "no valid questions were generated");
    }
}
