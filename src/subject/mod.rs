//! Homework subject detection
//!
//! Static keyword lookup over English, Russian and Uzbek terms. Categories
//! are checked in a fixed order and the first match wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Physics,
    Chemistry,
    Biology,
    Literature,
    English,
    History,
    Geography,
    Computer,
    General,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Physics => "physics",
            Self::Chemistry => "chemistry",
            Self::Biology => "biology",
            Self::Literature => "literature",
            Self::English => "english",
            Self::History => "history",
            Self::Geography => "geography",
            Self::Computer => "computer",
            Self::General => "general",
        }
    }
}

const MATH: &[&str] = &[
    "math", "mathematics", "algebra", "geometry", "equation", "equations", "solve", "calculate",
    "fraction", "fractions", "integral", "derivative", "triangle", "perimeter", "theorem",
    "математика", "уравнение", "решить", "решите", "вычислить", "дробь", "интеграл",
    "производная", "треугольник", "теорема",
    "matematika", "tenglama", "tenglamani", "yeching", "hisoblang", "kasr", "uchburchak",
    "perimetr", "teorema",
];

const PHYSICS: &[&str] = &[
    "physics", "velocity", "acceleration", "force", "newton", "energy", "momentum", "voltage",
    "current", "resistance", "gravity", "friction",
    "физика", "скорость", "ускорение", "сила", "энергия", "напряжение", "гравитация",
    "fizika", "tezlik", "tezlanish", "kuch", "energiya", "kuchlanish", "qarshilik",
];

const CHEMISTRY: &[&str] = &[
    "chemistry", "chemical", "molecule", "molecules", "atom", "atoms", "reaction", "acid",
    "oxidation", "molar", "compound", "periodic",
    "химия", "молекула", "атом", "реакция", "кислота", "валентность",
    "kimyo", "molekula", "reaksiya", "kislota", "valentlik", "modda",
];

const BIOLOGY: &[&str] = &[
    "biology", "cell", "cells", "photosynthesis", "organism", "dna", "gene", "genes",
    "evolution", "ecosystem", "species", "protein",
    "биология", "клетка", "фотосинтез", "организм", "ген", "эволюция",
    "biologiya", "hujayra", "fotosintez", "organizm", "gen", "evolyutsiya",
];

const LITERATURE: &[&str] = &[
    "literature", "poem", "poetry", "novel", "poet", "author", "character", "metaphor", "story",
    "литература", "стихотворение", "поэма", "роман", "поэт", "писатель",
    "adabiyot", "she'r", "sher", "roman", "shoir", "yozuvchi", "doston", "hikoya",
];

const ENGLISH: &[&str] = &[
    "grammar", "tense", "tenses", "verb", "verbs", "noun", "nouns", "adjective", "vocabulary",
    "translate", "sentence", "essay", "ielts", "article",
    "английский", "грамматика", "глагол", "перевести", "перевод",
    "ingliz", "grammatika", "fe'l", "tarjima", "gap",
];

const HISTORY: &[&str] = &[
    "history", "historical", "war", "empire", "revolution", "century", "dynasty", "ancient",
    "история", "война", "империя", "революция", "век", "династия",
    "tarix", "urush", "imperiya", "inqilob", "asr", "sulola", "amir", "temur",
];

const GEOGRAPHY: &[&str] = &[
    "geography", "continent", "climate", "river", "mountain", "population", "capital", "map",
    "latitude", "longitude", "ocean",
    "география", "континент", "климат", "река", "гора", "население", "океан",
    "geografiya", "materik", "iqlim", "daryo", "tog'", "aholi", "okean", "xarita",
];

const COMPUTER: &[&str] = &[
    "computer", "programming", "algorithm", "code", "python", "javascript", "java", "html",
    "database", "function", "variable", "loop", "binary",
    "информатика", "программирование", "алгоритм", "компьютер", "код",
    "informatika", "dasturlash", "algoritm", "kompyuter", "dastur",
];

fn keyword_pattern(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    // Explicit non-word guards instead of \b so words ending in an apostrophe (tog') still match
    Regex::new(&format!(r"(?i)(?:^|\W)(?:{})(?:\W|$)", alternation))
        .expect("keyword pattern is valid")
}

/// Equalities like `2x+3=7`, `12 * 4 = ?` and powers like `x^2`
static ARITHMETIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\s*[a-z]?\s*[+\-*/×÷^]\s*\d+\s*[a-z]?\s*=|[a-z]\^\d")
        .expect("arithmetic pattern is valid")
});

static CATEGORIES: LazyLock<Vec<(Subject, Regex)>> = LazyLock::new(|| {
    vec![
        (Subject::Math, keyword_pattern(MATH)),
        (Subject::Physics, keyword_pattern(PHYSICS)),
        (Subject::Chemistry, keyword_pattern(CHEMISTRY)),
        (Subject::Biology, keyword_pattern(BIOLOGY)),
        (Subject::Literature, keyword_pattern(LITERATURE)),
        (Subject::English, keyword_pattern(ENGLISH)),
        (Subject::History, keyword_pattern(HISTORY)),
        (Subject::Geography, keyword_pattern(GEOGRAPHY)),
        (Subject::Computer, keyword_pattern(COMPUTER)),
    ]
});

/// Classify homework text into a subject
pub fn detect_subject(text: &str) -> Subject {
    if ARITHMETIC.is_match(&text.to_lowercase()) {
        return Subject::Math;
    }

    CATEGORIES
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(subject, _)| *subject)
        .unwrap_or(Subject::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equation_is_math() {
        assert_eq!(detect_subject("solve the equation 2x+3=7"), Subject::Math);
        assert_eq!(detect_subject("Tenglamani yeching"), Subject::Math);
    }

    #[test]
    fn test_chart_description_is_general() {
        assert_eq!(
            detect_subject("describe the chart showing GDP growth"),
            Subject::General
        );
    }

    #[test]
    fn test_multilingual_keywords() {
        assert_eq!(detect_subject("Что такое фотосинтез?"), Subject::Biology);
        assert_eq!(detect_subject("Amir Temur davlati tarixi"), Subject::History);
        assert_eq!(detect_subject("Write a Python loop"), Subject::Computer);
        assert_eq!(detect_subject("Balance this chemical reaction"), Subject::Chemistry);
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        // "art" inside "chart", "gen" inside "general"
        assert_eq!(detect_subject("general chart notes"), Subject::General);
    }

    #[test]
    fn test_year_ranges_are_not_arithmetic() {
        assert_eq!(detect_subject("The war of 1941-1945"), Subject::History);
        assert_eq!(detect_subject("Tog' va daryolar"), Subject::Geography);
    }

    #[test]
    fn test_check_order_wins() {
        // physics term and math term: math is checked first
        assert_eq!(detect_subject("calculate the force"), Subject::Math);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Subject::Geography).unwrap(), "geography");
        assert_eq!(Subject::Computer.as_str(), "computer");
    }
}
