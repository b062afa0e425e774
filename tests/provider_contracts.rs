//! HTTP contracts of the provider adapters against local fixture servers

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use ziyoai_server::config::{Config, ProviderSettings};
use ziyoai_server::ocr::OcrService;
use ziyoai_server::providers::{
    AnthropicProvider, FallbackDispatcher, GeminiProvider, GenerateRequest, GenerativeProvider,
    GroqProvider, ProviderError,
};
use ziyoai_server::transcribe::Transcriber;

type Captured = Arc<Mutex<Vec<Value>>>;

async fn spawn_fixture(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn settings(base_url: &str, model: &str) -> ProviderSettings {
    ProviderSettings {
        api_key: Some("test-key".to_string()),
        model: model.to_string(),
        base_url: base_url.to_string(),
    }
}

fn no_ocr() -> Arc<OcrService> {
    Arc::new(OcrService::with_providers(Vec::new()))
}

#[tokio::test]
async fn gemini_sends_image_before_prompt() {
    let captured: Captured = Arc::default();
    let sink = captured.clone();
    let app = Router::new().route(
        "/v1beta/models/:target",
        post(
            move |Path(target): Path<String>,
                  Query(query): Query<HashMap<String, String>>,
                  headers: HeaderMap,
                  Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    let header_key = headers
                        .get("x-goog-api-key")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    sink.lock().unwrap().push(json!({
                        "target": target,
                        "queryKey": query.get("key"),
                        "headerKey": header_key,
                        "body": body
                    }));
                    Json(json!({
                        "candidates": [{ "content": { "parts": [{ "text": "Hello" }, { "text": "world" }] } }]
                    }))
                }
            },
        ),
    );
    let base = spawn_fixture(app).await;
    let provider = GeminiProvider::new(reqwest::Client::new(), "test-key", &settings(&base, "gemini-test"));

    let request = GenerateRequest::text("Describe", 512).with_image(b"img".to_vec(), "image/png");
    let text = provider.generate(&request).await.unwrap();

    assert_eq!(text, "Hello\nworld");
    let seen = captured.lock().unwrap()[0].clone();
    assert_eq!(seen["target"], "gemini-test:generateContent");
    assert_eq!(seen["headerKey"], "test-key");
    assert!(seen["queryKey"].is_null());
    let parts = &seen["body"]["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
    assert_eq!(parts[0]["inlineData"]["data"], "aW1n");
    assert_eq!(parts[1]["text"], "Describe");
    assert_eq!(seen["body"]["generationConfig"]["maxOutputTokens"], 512);
}

#[tokio::test]
async fn gemini_quota_error_is_classified() {
    let app = Router::new().route(
        "/v1beta/models/:target",
        post(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": { "status": "RESOURCE_EXHAUSTED" } })),
            )
        }),
    );
    let base = spawn_fixture(app).await;
    let provider = GeminiProvider::new(reqwest::Client::new(), "test-key", &settings(&base, "gemini-test"));

    let err = provider
        .generate(&GenerateRequest::text("hi", 16))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::QuotaExceeded(_)));
}

#[tokio::test]
async fn groq_uses_chat_completions_with_bearer() {
    let captured: Captured = Arc::default();
    let sink = captured.clone();
    let app = Router::new().route(
        "/chat/completions",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                sink.lock().unwrap().push(json!({ "auth": auth, "body": body }));
                Json(json!({ "choices": [{ "message": { "role": "assistant", "content": "Salom" } }] }))
            }
        }),
    );
    let base = spawn_fixture(app).await;
    let provider = GroqProvider::new(reqwest::Client::new(), "test-key", &settings(&base, "llama-test"));

    let request = GenerateRequest::text("Translate", 256).with_temperature(0.7);
    assert_eq!(provider.generate(&request).await.unwrap(), "Salom");

    let seen = captured.lock().unwrap()[0].clone();
    assert_eq!(seen["auth"], "Bearer test-key");
    assert_eq!(seen["body"]["model"], "llama-test");
    assert_eq!(seen["body"]["max_tokens"], 256);
    assert_eq!(seen["body"]["messages"][0]["role"], "user");
    assert_eq!(seen["body"]["messages"][0]["content"], "Translate");
}

#[tokio::test]
async fn groq_refuses_images() {
    let provider = GroqProvider::new(
        reqwest::Client::new(),
        "test-key",
        &settings("http://127.0.0.1:1", "llama-test"),
    );
    let request = GenerateRequest::text("Describe", 16).with_image(b"img".to_vec(), "image/png");
    let err = provider.generate(&request).await.unwrap_err();
    assert!(matches!(err, ProviderError::ImagesUnsupported));
}

#[tokio::test]
async fn anthropic_joins_text_blocks() {
    let captured: Captured = Arc::default();
    let sink = captured.clone();
    let app = Router::new().route(
        "/v1/messages",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                let header = |name: &str| {
                    headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string()
                };
                sink.lock().unwrap().push(json!({
                    "key": header("x-api-key"),
                    "version": header("anthropic-version"),
                    "body": body
                }));
                Json(json!({
                    "content": [
                        { "type": "text", "text": "Part one. " },
                        { "type": "tool_use", "id": "x" },
                        { "type": "text", "text": "Part two." }
                    ]
                }))
            }
        }),
    );
    let base = spawn_fixture(app).await;
    let provider =
        AnthropicProvider::new(reqwest::Client::new(), "test-key", &settings(&base, "claude-test"));

    let text = provider.generate(&GenerateRequest::text("Explain", 128)).await.unwrap();

    assert_eq!(text, "Part one. Part two.");
    let seen = captured.lock().unwrap()[0].clone();
    assert_eq!(seen["key"], "test-key");
    assert_eq!(seen["version"], "2023-06-01");
    assert_eq!(seen["body"]["max_tokens"], 128);
}

#[tokio::test]
async fn empty_output_is_an_error() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({ "choices": [{ "message": { "content": "   " } }] })) }),
    );
    let base = spawn_fixture(app).await;
    let provider = GroqProvider::new(reqwest::Client::new(), "test-key", &settings(&base, "llama-test"));

    let err = provider.generate(&GenerateRequest::text("hi", 16)).await.unwrap_err();
    assert!(matches!(err, ProviderError::EmptyResponse));
}

#[tokio::test]
async fn configured_chain_falls_through_quota_to_next_provider() {
    let gemini = Router::new().route(
        "/v1beta/models/:target",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota") }),
    );
    let groq = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let anthropic = Router::new().route(
        "/v1/messages",
        post(|| async { Json(json!({ "content": [{ "type": "text", "text": "rescued" }] })) }),
    );

    let mut config = Config::default().providers;
    config.gemini = settings(&spawn_fixture(gemini).await, "gemini-test");
    config.groq = settings(&spawn_fixture(groq).await, "llama-test");
    config.anthropic = settings(&spawn_fixture(anthropic).await, "claude-test");

    let dispatcher = FallbackDispatcher::from_config(&config, no_ocr());
    assert_eq!(dispatcher.provider_names(), vec!["gemini", "groq", "anthropic"]);

    let text = dispatcher.dispatch("hello", 64).await.unwrap();
    assert_eq!(text, "rescued");
}

#[tokio::test]
async fn transcriber_posts_multipart_audio() {
    let captured: Captured = Arc::default();
    let sink = captured.clone();
    let app = Router::new().route(
        "/audio/transcriptions",
        post(move |headers: HeaderMap, body: axum::body::Bytes| {
            let sink = sink.clone();
            async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let body = String::from_utf8_lossy(&body).to_string();
                sink.lock()
                    .unwrap()
                    .push(json!({ "contentType": content_type, "body": body }));
                Json(json!({ "text": " Hello teacher. " }))
            }
        }),
    );
    let base = spawn_fixture(app).await;
    let transcriber = Transcriber::new(reqwest::Client::new(), &settings(&base, "unused"));

    let transcript = transcriber
        .transcribe(b"fake-audio".to_vec(), "clip.webm", "audio/webm")
        .await
        .unwrap();

    assert_eq!(transcript, "Hello teacher.");
    let seen = captured.lock().unwrap()[0].clone();
    assert!(seen["contentType"].as_str().unwrap().starts_with("multipart/form-data"));
    let body = seen["body"].as_str().unwrap();
    assert!(body.contains("whisper-large-v3"));
    assert!(body.contains("filename=\"clip.webm\""));
    assert!(body.contains("fake-audio"));
}
