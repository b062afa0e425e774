//! ZiyoAI Server
//!
//! Educational assistant backend with multi-provider AI fallback.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ziyoai_server::articles::ArticleScanner;
use ziyoai_server::config::Config;
use ziyoai_server::ocr::OcrService;
use ziyoai_server::providers::FallbackDispatcher;
use ziyoai_server::routes;
use ziyoai_server::state::AppState;
use ziyoai_server::transcribe::Transcriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the filter so RUST_LOG can come from it
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ziyoai_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    tracing::info!("Starting ZiyoAI Server v{}", env!("CARGO_PKG_VERSION"));

    let ocr = Arc::new(OcrService::new(&config.ocr));
    let available_ocr = ocr.available_providers().await;
    if available_ocr.is_empty() {
        tracing::warn!("No OCR backend available, image rescue will fail");
    } else {
        tracing::info!("OCR backends: {:?}", available_ocr);
    }

    let dispatcher = FallbackDispatcher::from_config(&config.providers, ocr);
    tracing::info!("AI providers: {:?}", dispatcher.provider_names());

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.providers.timeout_secs))
        .build()
        .context("failed to build HTTP client")?;
    let transcriber = Transcriber::new(http, &config.providers.groq);
    if !transcriber.is_configured() {
        tracing::warn!("GROQ_API_KEY not set, /api/audio-to-text is disabled");
    }

    let articles = Arc::new(ArticleScanner::new(&config.articles.dir).scan().await);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.server.host, config.server.port))?;

    let app = routes::router(AppState::new(config, dispatcher, transcriber, articles));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("ZiyoAI Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
