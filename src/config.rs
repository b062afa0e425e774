//! Configuration management for ZiyoAI Server

use std::env;
use std::path::PathBuf;

use crate::ocr::OcrProvider;

/// Frontends allowed to call the API when `ALLOWED_ORIGINS` is not set
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://zioai-frontend.onrender.com",
    "http://localhost:3000",
    "http://127.0.0.1:5500",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
    pub ocr: OcrConfig,
    pub articles: ArticlesConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

/// Credentials and endpoints for the AI providers.
///
/// A provider without an API key is left out of the fallback chain.
#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    pub gemini: ProviderSettings,
    pub groq: ProviderSettings,
    pub anthropic: ProviderSettings,
    /// Per-request timeout applied to every provider call
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Backends tried in order during OCR rescue
    pub providers: Vec<OcrProvider>,
    /// Tesseract language list (e.g. "eng+rus+uzb")
    pub languages: String,
    pub ollama_url: String,
    pub ollama_model: String,
}

#[derive(Debug, Clone)]
pub struct ArticlesConfig {
    /// Root holding one sub-folder per CEFR level
    pub dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                allowed_origins: DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            providers: ProvidersConfig {
                gemini: ProviderSettings {
                    api_key: None,
                    model: "gemini-2.0-flash".to_string(),
                    base_url: "https://generativelanguage.googleapis.com".to_string(),
                },
                groq: ProviderSettings {
                    api_key: None,
                    model: "llama-3.3-70b-versatile".to_string(),
                    base_url: "https://api.groq.com/openai/v1".to_string(),
                },
                anthropic: ProviderSettings {
                    api_key: None,
                    model: "claude-sonnet-4-20250514".to_string(),
                    base_url: "https://api.anthropic.com".to_string(),
                },
                timeout_secs: 120,
            },
            ocr: OcrConfig {
                providers: vec![OcrProvider::Tesseract],
                languages: "eng+rus+uzb".to_string(),
                ollama_url: "http://localhost:11434".to_string(),
                ollama_model: "llava".to_string(),
            },
            articles: ArticlesConfig {
                dir: PathBuf::from("articles"),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or(defaults.server.host),
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
                allowed_origins: env::var("ALLOWED_ORIGINS")
                    .ok()
                    .map(|v| split_list(&v))
                    .filter(|list| !list.is_empty())
                    .unwrap_or(defaults.server.allowed_origins),
            },
            providers: ProvidersConfig {
                gemini: provider_from_env("GEMINI", defaults.providers.gemini),
                groq: provider_from_env("GROQ", defaults.providers.groq),
                anthropic: provider_from_env("ANTHROPIC", defaults.providers.anthropic),
                timeout_secs: env::var("PROVIDER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.providers.timeout_secs),
            },
            ocr: OcrConfig {
                providers: env::var("OCR_PROVIDERS")
                    .ok()
                    .map(|v| {
                        split_list(&v)
                            .iter()
                            .filter_map(|name| match name.to_lowercase().as_str() {
                                "tesseract" => Some(OcrProvider::Tesseract),
                                "ollama" => Some(OcrProvider::Ollama),
                                other => {
                                    tracing::warn!("Ignoring unknown OCR provider '{}'", other);
                                    None
                                }
                            })
                            .collect()
                    })
                    .unwrap_or(defaults.ocr.providers),
                languages: env::var("OCR_LANGUAGES").unwrap_or(defaults.ocr.languages),
                ollama_url: env::var("OLLAMA_URL").unwrap_or(defaults.ocr.ollama_url),
                ollama_model: env::var("OLLAMA_MODEL").unwrap_or(defaults.ocr.ollama_model),
            },
            articles: ArticlesConfig {
                dir: env::var("ARTICLES_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.articles.dir),
            },
        }
    }
}

fn provider_from_env(prefix: &str, defaults: ProviderSettings) -> ProviderSettings {
    ProviderSettings {
        api_key: non_empty_var(&format!("{}_API_KEY", prefix)),
        model: non_empty_var(&format!("{}_MODEL", prefix)).unwrap_or(defaults.model),
        base_url: non_empty_var(&format!("{}_BASE_URL", prefix)).unwrap_or(defaults.base_url),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
