//! Article types

use serde::Serialize;
use thiserror::Error;

/// Levels that have an article folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CefrLevel {
    B1,
    B2,
    C1,
}

impl CefrLevel {
    pub const ALL: [CefrLevel; 3] = [CefrLevel::B1, CefrLevel::B2, CefrLevel::C1];

    /// Folder name, also the serialized value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
        }
    }
}

/// A reading article
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// `<level>-<slug>`, stable across restarts
    pub id: String,
    pub title: String,
    pub level: CefrLevel,
    /// Estimated minutes to read
    pub read_time: u32,
    pub category: String,
    pub description: String,
    pub content: String,
    pub vocabulary: Vec<String>,
}

#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("article has no text")]
    Empty,
}

/// Snapshot of every article found at startup
#[derive(Debug, Default)]
pub struct ArticleCatalog {
    articles: Vec<Article>,
}

impl ArticleCatalog {
    pub fn new(mut articles: Vec<Article>) -> Self {
        articles.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.title.cmp(&b.title)));
        Self { articles }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }
}
