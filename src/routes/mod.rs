//! Route modules for the ZiyoAI server

pub mod articles;
pub mod audio;
pub mod health;
pub mod homework;
pub mod motivation;
pub mod quiz;
pub mod speaking;
pub mod study;
pub mod vocabulary;
pub mod writing;

use axum::{
    extract::{DefaultBodyLimit, FromRequest, Multipart},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::IntoResponse,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::prompts::Language;
use crate::state::AppState;

/// JSON bodies may carry base64 images
pub const MAX_JSON_BODY_BYTES: usize = 50 * 1024 * 1024;

/// `Json` extractor whose rejections use the error envelope
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `Multipart` extractor whose rejections use the error envelope
#[derive(FromRequest)]
#[from_request(rejection(AppError))]
pub struct ApiMultipart(pub Multipart);

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config().server.allowed_origins);

    Router::new()
        .merge(health::router())
        .merge(homework::router())
        .merge(writing::router())
        .merge(vocabulary::router())
        .merge(motivation::router())
        .merge(quiz::router())
        .merge(study::router())
        .merge(speaking::router())
        .merge(articles::router())
        .merge(audio::router())
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_JSON_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Sahifa topilmadi",
            "path": uri.path(),
        })),
    )
}

/// Trimmed, non-empty field or a localized 400
pub(crate) fn require_field(
    language: Language,
    name: &str,
    value: Option<String>,
) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(language.missing(name)))
}

/// Blank optional fields are treated as absent
pub(crate) fn optional_field(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
