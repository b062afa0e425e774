//! Request languages and the few user-facing strings that vary by language

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Uz,
    Ru,
    En,
}

impl Language {
    /// Parse a request language code; unknown or missing codes fall back to Uzbek
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_lowercase()).as_deref() {
            Some("ru") => Self::Ru,
            Some("en") => Self::En,
            _ => Self::Uz,
        }
    }

    /// Closing directive appended to every prompt
    pub fn answer_directive(&self) -> &'static str {
        match self {
            Self::Uz => "⚠️ JAVOBNI FAQAT O'ZBEK TILIDA YOZ! 🇺🇿",
            Self::Ru => "⚠️ ОТВЕЧАЙ ТОЛЬКО НА РУССКОМ ЯЗЫКЕ! 🇷🇺",
            Self::En => "⚠️ ANSWER ONLY IN ENGLISH! 🇬🇧",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Uz => "Uzbek",
            Self::Ru => "Russian",
            Self::En => "English",
        }
    }

    /// Validation message for a missing or blank field
    pub fn missing(&self, field: &str) -> String {
        match self {
            Self::Uz => format!("'{}' maydoni bo'sh yoki yuborilmadi", field),
            Self::Ru => format!("Поле '{}' не заполнено", field),
            Self::En => format!("Field '{}' is missing or empty", field),
        }
    }

    /// Validation message for text below the minimum word count
    pub fn too_short(&self, words: usize, minimum: usize) -> String {
        match self {
            Self::Uz => format!("Matn juda qisqa: {} so'z (kamida {} so'z kerak)", words, minimum),
            Self::Ru => format!("Текст слишком короткий: {} слов (нужно минимум {})", words, minimum),
            Self::En => format!("Text is too short: {} words (at least {} required)", words, minimum),
        }
    }

    pub fn question_count_range(&self, min: u32, max: u32) -> String {
        match self {
            Self::Uz => format!("Savollar soni {} dan {} gacha bo'lishi kerak", min, max),
            Self::Ru => format!("Количество вопросов должно быть от {} до {}", min, max),
            Self::En => format!("Question count must be between {} and {}", min, max),
        }
    }

    pub fn invalid_value(&self, field: &str, value: &str) -> String {
        match self {
            Self::Uz => format!("'{}' maydoni uchun noto'g'ri qiymat: {}", field, value),
            Self::Ru => format!("Недопустимое значение поля '{}': {}", field, value),
            Self::En => format!("Invalid value for '{}': {}", field, value),
        }
    }
}
