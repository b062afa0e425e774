//! Homework check endpoint

use axum::{extract::State, routing::post, Json, Router};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::formatter::format_response;
use crate::prompts::{self, Language};
use crate::state::AppState;
use crate::subject::{detect_subject, Subject};

use super::{require_field, ApiJson};

const HOMEWORK_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Deserialize)]
pub struct HomeworkRequest {
    pub homework: Option<String>,
    /// `data:<mime>;base64,<data>` URL
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeworkResponse {
    pub success: bool,
    pub corrected_homework: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_subject: Option<Subject>,
}

/// Decoded image from a data URL
#[derive(Debug, PartialEq)]
pub struct DataUrlImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Parse `data:image/<kind>;base64,<payload>`
pub fn parse_image_data_url(url: &str) -> Option<DataUrlImage> {
    let rest = url.trim().strip_prefix("data:")?;
    let (mime_type, payload) = rest.split_once(";base64,")?;
    if !mime_type.starts_with("image/") {
        return None;
    }
    let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let data = STANDARD.decode(payload).ok()?;
    if data.is_empty() {
        return None;
    }
    Some(DataUrlImage {
        mime_type: mime_type.to_string(),
        data,
    })
}

async fn fix_homework(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<HomeworkRequest>,
) -> Result<Json<HomeworkResponse>> {
    let language = Language::from_code(request.language.as_deref());

    if request.kind.as_deref() == Some("image") {
        let url = require_field(language, "image", request.image)?;
        let image = parse_image_data_url(&url)
            .ok_or_else(|| AppError::BadRequest(language.invalid_value("image", "data URL")))?;

        tracing::info!("Checking image homework ({}, {} bytes)", image.mime_type, image.data.len());

        let prompt = prompts::homework(language, None, None);
        let raw = state
            .dispatcher()
            .dispatch_with_image(&prompt, &image.data, &image.mime_type, HOMEWORK_MAX_TOKENS)
            .await?;

        return Ok(Json(HomeworkResponse {
            success: true,
            corrected_homework: format_response(&raw),
            detected_subject: None,
        }));
    }

    let homework = require_field(language, "homework", request.homework)?;
    let subject = detect_subject(&homework);
    tracing::info!("Checking text homework, detected subject {}", subject.as_str());

    let prompt = prompts::homework(language, Some(&homework), Some(subject));
    let raw = state.dispatcher().dispatch(&prompt, HOMEWORK_MAX_TOKENS).await?;

    Ok(Json(HomeworkResponse {
        success: true,
        corrected_homework: format_response(&raw),
        detected_subject: Some(subject),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/fix-homework", post(fix_homework))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_url() {
        let url = format!("data:image/png;base64,{}", STANDARD.encode(b"png-bytes"));
        let image = parse_image_data_url(&url).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, b"png-bytes");
    }

    #[test]
    fn test_rejects_malformed_data_urls() {
        assert!(parse_image_data_url("not a url").is_none());
        assert!(parse_image_data_url("data:image/png,raw").is_none());
        assert!(parse_image_data_url("data:text/plain;base64,aGk=").is_none());
        assert!(parse_image_data_url("data:image/png;base64,!!!").is_none());
        assert!(parse_image_data_url("data:image/png;base64,").is_none());
    }
}
