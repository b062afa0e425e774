//! Application state management

use std::sync::Arc;

use crate::articles::ArticleCatalog;
use crate::config::Config;
use crate::providers::FallbackDispatcher;
use crate::transcribe::Transcriber;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    dispatcher: FallbackDispatcher,
    transcriber: Transcriber,
    articles: Arc<ArticleCatalog>,
}

impl AppState {
    /// Assemble the state from already built services
    pub fn new(
        config: Config,
        dispatcher: FallbackDispatcher,
        transcriber: Transcriber,
        articles: Arc<ArticleCatalog>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                dispatcher,
                transcriber,
                articles,
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Provider fallback chain
    pub fn dispatcher(&self) -> &FallbackDispatcher {
        &self.inner.dispatcher
    }

    pub fn transcriber(&self) -> &Transcriber {
        &self.inner.transcriber
    }

    /// Article snapshot taken at startup
    pub fn articles(&self) -> &ArticleCatalog {
        &self.inner.articles
    }
}
