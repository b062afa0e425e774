//! Article directory scanner

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::types::{Article, ArticleCatalog, ArticleError, CefrLevel};

pub const READING_WORDS_PER_MINUTE: usize = 200;

const DESCRIPTION_MAX_CHARS: usize = 200;
const VOCABULARY_SIZE: usize = 15;
const VOCABULARY_MIN_LEN: usize = 7;

const CATEGORIES: &[(&str, &[&str])] = &[
    ("technology", &["technology", "computer", "internet", "digital", "software", "robot", "artificial", "smartphone"]),
    ("science", &["science", "scientist", "research", "experiment", "space", "planet", "physics", "discovery"]),
    ("environment", &["environment", "climate", "pollution", "nature", "ocean", "forest", "recycling", "energy"]),
    ("health", &["health", "medicine", "doctor", "disease", "exercise", "sleep", "diet", "hospital"]),
    ("education", &["education", "school", "student", "university", "teacher", "learning", "exam"]),
    ("culture", &["culture", "music", "art", "film", "tradition", "festival", "museum", "literature"]),
    ("business", &["business", "economy", "company", "market", "money", "finance", "career", "startup"]),
];

const STOP_WORDS: &[&str] = &[
    "because", "between", "however", "through", "without", "another", "anything", "everything",
    "something", "nothing", "although", "already", "whether", "perhaps", "themselves", "yourself",
    "himself", "herself", "therefore", "whatever", "whenever", "wherever", "several", "usually",
    "actually", "probably", "certainly", "different", "important", "example", "instead",
];

/// Builds the article catalog from `<root>/{B1,B2,C1}`
pub struct ArticleScanner {
    root: PathBuf,
}

impl ArticleScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scan every level folder; unreadable files are skipped
    pub async fn scan(&self) -> ArticleCatalog {
        if !self.root.is_dir() {
            tracing::warn!("Articles directory {} not found, catalog is empty", self.root.display());
            return ArticleCatalog::default();
        }

        let mut articles = Vec::new();
        for level in CefrLevel::ALL {
            let dir = self.root.join(level.as_str());
            match self.scan_level(&dir, level).await {
                Ok(mut found) => {
                    tracing::debug!("Found {} {} articles", found.len(), level.as_str());
                    articles.append(&mut found);
                }
                Err(e) => tracing::debug!("Skipping {}: {}", dir.display(), e),
            }
        }

        tracing::info!("Article catalog loaded with {} articles", articles.len());
        ArticleCatalog::new(articles)
    }

    async fn scan_level(&self, dir: &Path, level: CefrLevel) -> Result<Vec<Article>, ArticleError> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut articles = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match load_article(&path, level).await {
                Ok(Some(article)) => articles.push(article),
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping article {}: {}", path.display(), e),
            }
        }

        Ok(articles)
    }
}

/// Load one file; `None` for unsupported extensions
async fn load_article(path: &Path, level: CefrLevel) -> Result<Option<Article>, ArticleError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let raw = match extension.as_deref() {
        Some("txt") => tokio::fs::read_to_string(path).await?,
        Some("pdf") => {
            let bytes = tokio::fs::read(path).await?;
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await
                .map_err(|e| ArticleError::Pdf(e.to_string()))?
                .map_err(|e| ArticleError::Pdf(e.to_string()))?
        }
        _ => return Ok(None),
    };

    let content = normalize_text(&raw);
    if content.is_empty() {
        return Err(ArticleError::Empty);
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled");

    Ok(Some(build_article(stem, level, content)))
}

fn build_article(stem: &str, level: CefrLevel, content: String) -> Article {
    let title = title_from_stem(stem);
    Article {
        id: format!("{}-{}", level.as_str().to_lowercase(), slugify(&title)),
        read_time: read_time(&content),
        category: categorize(&content).to_string(),
        description: describe(&content),
        vocabulary: extract_vocabulary(&content),
        title,
        level,
        content,
    }
}

/// Trim lines and collapse blank-line runs to one paragraph break
fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank = false;
    for line in raw.lines().map(str::trim) {
        if line.is_empty() {
            blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push_str(if blank { "\n\n" } else { "\n" });
        }
        out.push_str(line);
        blank = false;
    }
    out
}

fn title_from_stem(stem: &str) -> String {
    stem.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn read_time(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    words.div_ceil(READING_WORDS_PER_MINUTE).max(1) as u32
}

fn words_lowercase(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .split(|c: char| !c.is_alphabetic() && c != '\'')
        .map(|w| w.trim_matches('\'').to_lowercase())
        .filter(|w| !w.is_empty())
}

/// Category whose keywords occur most often; ties go to the earlier entry
fn categorize(content: &str) -> &'static str {
    let words: Vec<String> = words_lowercase(content).collect();

    let mut best = ("general", 0usize);
    for (category, keywords) in CATEGORIES {
        let hits = words
            .iter()
            .filter(|w| keywords.contains(&w.as_str()))
            .count();
        if hits > best.1 {
            best = (*category, hits);
        }
    }
    best.0
}

/// First sentence, capped at 200 characters
fn describe(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");

    let sentence_end = flat
        .char_indices()
        .find(|&(i, c)| {
            matches!(c, '.' | '!' | '?')
                && flat[i + c.len_utf8()..]
                    .chars()
                    .next()
                    .map_or(true, char::is_whitespace)
        })
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(flat.len());
    let sentence = &flat[..sentence_end];

    if sentence.chars().count() <= DESCRIPTION_MAX_CHARS {
        return sentence.to_string();
    }
    let mut cut: String = sentence.chars().take(DESCRIPTION_MAX_CHARS - 1).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}

/// Longer words ordered by frequency, then first appearance
fn extract_vocabulary(content: &str) -> Vec<String> {
    let stop: HashSet<&str> = STOP_WORDS.iter().copied().collect();
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

    for (position, word) in words_lowercase(content).enumerate() {
        if word.chars().count() < VOCABULARY_MIN_LEN
            || !word.chars().all(char::is_alphabetic)
            || stop.contains(word.as_str())
        {
            continue;
        }
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked
        .into_iter()
        .take(VOCABULARY_SIZE)
        .map(|(word, _)| word)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_title_and_slug() {
        assert_eq!(title_from_stem("The_Future-of  Work"), "The Future of Work");
        assert_eq!(slugify("The Future of Work!"), "the-future-of-work");
    }

    #[test]
    fn test_read_time_rounds_up() {
        assert_eq!(read_time("one two three"), 1);
        assert_eq!(read_time(&"word ".repeat(200)), 1);
        assert_eq!(read_time(&"word ".repeat(201)), 2);
        assert_eq!(read_time(""), 1);
    }

    #[test]
    fn test_categorize() {
        assert_eq!(
            categorize("Climate change and pollution harm the ocean and the forest."),
            "environment"
        );
        assert_eq!(categorize("A quiet afternoon."), "general");
    }

    #[test]
    fn test_describe_takes_first_sentence() {
        assert_eq!(describe("Bees matter. They pollinate plants."), "Bees matter.");
        assert_eq!(describe("Version 2.5 is out today"), "Version 2.5 is out today");

        let long = "a".repeat(300);
        let description = describe(&long);
        assert_eq!(description.chars().count(), DESCRIPTION_MAX_CHARS);
        assert!(description.ends_with('…'));
    }

    #[test]
    fn test_vocabulary_by_frequency() {
        let text = "Renewable energy matters. Renewable sources and renewable grids. \
                    Governments invest because governments plan. Batteries store power.";
        let vocab = extract_vocabulary(text);
        assert_eq!(vocab[0], "renewable");
        assert_eq!(vocab[1], "governments");
        assert!(vocab.contains(&"batteries".to_string()));
        assert!(!vocab.contains(&"because".to_string()));
        assert!(!vocab.contains(&"energy".to_string()));
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  a  \n\n\n b\nc \n\n"), "a\n\nb\nc");
    }

    #[tokio::test]
    async fn test_scan_reads_level_folders() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("B1")).unwrap();
        fs::create_dir(dir.path().join("C1")).unwrap();
        fs::create_dir(dir.path().join("A2")).unwrap();
        fs::write(
            dir.path().join("B1/healthy_sleep.txt"),
            "Sleep keeps the doctor away. Good sleep improves health.",
        )
        .unwrap();
        fs::write(dir.path().join("C1/space-travel.txt"), "Space research continues.").unwrap();
        fs::write(dir.path().join("C1/notes.md"), "ignored").unwrap();
        fs::write(dir.path().join("A2/ignored.txt"), "Not a catalog level.").unwrap();
        fs::write(dir.path().join("B1/empty.txt"), "   \n").unwrap();

        let catalog = ArticleScanner::new(dir.path()).scan().await;

        assert_eq!(catalog.len(), 2);
        let sleep = catalog.get("b1-healthy-sleep").unwrap();
        assert_eq!(sleep.title, "healthy sleep");
        assert_eq!(sleep.level, CefrLevel::B1);
        assert_eq!(sleep.category, "health");
        assert_eq!(sleep.description, "Sleep keeps the doctor away.");
        assert_eq!(catalog.articles()[1].level, CefrLevel::C1);
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("B2")).unwrap();
        fs::write(dir.path().join("B2/broken.pdf"), b"not a pdf").unwrap();
        fs::write(dir.path().join("B2/fine.txt"), "Fine text.").unwrap();

        let catalog = ArticleScanner::new(dir.path()).scan().await;
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.articles()[0].id, "b2-fine");
    }

    #[tokio::test]
    async fn test_missing_root_is_empty() {
        let catalog = ArticleScanner::new("/definitely/not/here").scan().await;
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_article_serializes_camel_case() {
        let article = build_article("x", CefrLevel::B2, "Short text.".to_string());
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["readTime"], 1);
        assert_eq!(json["level"], "B2");
    }
}
