//! Reading article catalog
//!
//! Articles live under one folder per CEFR level and are scanned once at
//! startup. The resulting [`ArticleCatalog`] is an immutable snapshot shared
//! through the application state.

mod scanner;
mod types;

pub use scanner::{ArticleScanner, READING_WORDS_PER_MINUTE};
pub use types::{Article, ArticleCatalog, ArticleError, CefrLevel};
