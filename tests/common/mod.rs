//! Shared helpers for router tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;

use ziyoai_server::articles::{ArticleCatalog, ArticleScanner};
use ziyoai_server::config::Config;
use ziyoai_server::ocr::OcrService;
use ziyoai_server::providers::{
    FallbackDispatcher, GenerateRequest, GenerativeProvider, ProviderError, ProviderKind,
};
use ziyoai_server::routes;
use ziyoai_server::state::AppState;
use ziyoai_server::transcribe::Transcriber;

/// Provider answering with a fixed text or a fixed HTTP failure
pub struct ScriptedProvider {
    kind: ProviderKind,
    reply: Result<String, u16>,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl ScriptedProvider {
    pub fn answering(kind: ProviderKind, text: &str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn failing(kind: ProviderKind, status: u16) -> Arc<Self> {
        Arc::new(Self {
            kind,
            reply: Err(status),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeProvider for ScriptedProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn supports_images(&self) -> bool {
        self.kind == ProviderKind::Gemini
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(ProviderError::Status {
                status: *status,
                body: "scripted failure".to_string(),
            }),
        }
    }
}

/// Full application router over any provider chain, default config and no OCR
pub fn router_with(
    providers: Vec<Arc<dyn GenerativeProvider>>,
    articles: ArticleCatalog,
) -> Router {
    let config = Config::default();
    let ocr = Arc::new(OcrService::with_providers(Vec::new()));
    let dispatcher = FallbackDispatcher::new(providers, ocr);
    let transcriber = Transcriber::new(reqwest::Client::new(), &config.providers.groq);

    let state = AppState::new(config, dispatcher, transcriber, Arc::new(articles));
    routes::router(state)
}

pub fn server_with(providers: Vec<Arc<ScriptedProvider>>, articles: ArticleCatalog) -> TestServer {
    let providers = providers
        .into_iter()
        .map(|p| p as Arc<dyn GenerativeProvider>)
        .collect();
    TestServer::new(router_with(providers, articles)).unwrap()
}

/// Server whose single provider always answers `text`
pub fn server_answering(text: &str) -> (TestServer, Arc<ScriptedProvider>) {
    let provider = ScriptedProvider::answering(ProviderKind::Gemini, text);
    (server_with(vec![provider.clone()], ArticleCatalog::default()), provider)
}

pub async fn catalog_from(dir: &Path) -> ArticleCatalog {
    ArticleScanner::new(dir).scan().await
}
