//! Quiz extraction and scoring
//!
//! Models are asked to answer with a bare JSON object but regularly wrap it
//! in prose or code fences. [`extract_quiz`] recovers the object and keeps
//! only well-formed questions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Each question must offer exactly this many options
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Allowed range for `questionCount`
pub const MIN_QUESTIONS: u32 = 1;
pub const MAX_QUESTIONS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: u8,
    pub explanation: String,
}

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("response contains no JSON object")]
    NoJsonObject,

    #[error("invalid quiz JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("quiz JSON has no questions array")]
    MissingQuestions,

    #[error("no valid questions were generated")]
    NoValidQuestions,
}

/// Strip fences and prose, returning the outermost `{ ... }` slice
pub fn isolate_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parse a model response into validated quiz questions
pub fn extract_quiz(raw: &str) -> Result<Vec<QuizQuestion>, QuizError> {
    // Fence markers sit outside the object, so slicing between braces drops them
    let json = isolate_json_object(raw).ok_or(QuizError::NoJsonObject)?;
    let value: Value = serde_json::from_str(json)?;

    let questions = value
        .get("questions")
        .and_then(Value::as_array)
        .ok_or(QuizError::MissingQuestions)?;

    let total = questions.len();
    let valid: Vec<QuizQuestion> = questions.iter().filter_map(validate_question).collect();

    if valid.len() < total {
        tracing::warn!("Dropped {} malformed quiz questions", total - valid.len());
    }

    if valid.is_empty() {
        return Err(QuizError::NoValidQuestions);
    }

    Ok(valid)
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn validate_question(value: &Value) -> Option<QuizQuestion> {
    let question = non_empty_str(value, "question")?;
    let explanation = non_empty_str(value, "explanation")?;

    let options = value.get("options")?.as_array()?;
    if options.len() != OPTIONS_PER_QUESTION {
        return None;
    }
    let options: Vec<String> = options
        .iter()
        .map(|o| o.as_str().map(|s| s.trim().to_string()))
        .collect::<Option<_>>()?;

    let correct = value.get("correctAnswer")?.as_u64()?;
    if correct >= OPTIONS_PER_QUESTION as u64 {
        return None;
    }

    Some(QuizQuestion {
        question: question.to_string(),
        options,
        correct_answer: correct as u8,
        explanation: explanation.to_string(),
    })
}

/// Feedback for a finished quiz
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizStats {
    pub percentage: u32,
    pub message: &'static str,
    pub emoji: &'static str,
}

/// Score a finished quiz; `None` when the counts are inconsistent
pub fn quiz_stats(score: u32, total_questions: u32) -> Option<QuizStats> {
    if total_questions == 0 || score > total_questions {
        return None;
    }

    let percentage = ((score as f64 / total_questions as f64) * 100.0).round() as u32;

    let (message, emoji) = match percentage {
        90.. => ("Ajoyib! 🎉", "🏆"),
        70..=89 => ("Yaxshi! Davom eting! 💪", "⭐"),
        50..=69 => ("Yomon emas! Yana mashq qiling! 📚", "📖"),
        _ => ("Mashq qilishda davom eting! 🎯", "💡"),
    };

    Some(QuizStats {
        percentage,
        message,
        emoji,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"{"question":"Capital of Uzbekistan?","options":["Tashkent","Samarkand","Bukhara","Khiva"],"correctAnswer":0,"explanation":"Tashkent is the capital."}"#;

    #[test]
    fn test_extracts_from_prose_and_fences() {
        let raw = format!(
            "Here is the quiz:\n```json\n{{\"questions\":[{}]}}\n```\nGood luck!",
            GOOD
        );
        let questions = extract_quiz(&raw).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options[0], "Tashkent");
        assert_eq!(questions[0].correct_answer, 0);
    }

    #[test]
    fn test_drops_invalid_questions() {
        let missing_answer = r#"{"question":"Q?","options":["a","b","c","d"],"explanation":"e"}"#;
        let three_options = r#"{"question":"Q?","options":["a","b","c"],"correctAnswer":1,"explanation":"e"}"#;
        let out_of_range = r#"{"question":"Q?","options":["a","b","c","d"],"correctAnswer":4,"explanation":"e"}"#;
        let raw = format!(
            "{{\"questions\":[{},{},{},{}]}}",
            missing_answer, GOOD, three_options, out_of_range
        );

        let questions = extract_quiz(&raw).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Capital of Uzbekistan?");
    }

    #[test]
    fn test_all_invalid_is_failure() {
        let raw = r#"{"questions":[{"question":"Q?","options":["a","b","c"],"correctAnswer":0,"explanation":"e"}]}"#;
        assert!(matches!(extract_quiz(raw), Err(QuizError::NoValidQuestions)));
    }

    #[test]
    fn test_string_answer_index_is_rejected() {
        let raw = r#"{"questions":[{"question":"Q?","options":["a","b","c","d"],"correctAnswer":"1","explanation":"e"}]}"#;
        assert!(matches!(extract_quiz(raw), Err(QuizError::NoValidQuestions)));
    }

    #[test]
    fn test_missing_object_and_bad_json() {
        assert!(matches!(extract_quiz("sorry, no quiz"), Err(QuizError::NoJsonObject)));
        assert!(matches!(extract_quiz("{ not json }"), Err(QuizError::Parse(_))));
        assert!(matches!(extract_quiz(r#"{"items":[]}"#), Err(QuizError::MissingQuestions)));
    }

    #[test]
    fn test_serializes_camel_case() {
        let q: QuizQuestion = serde_json::from_str(GOOD).unwrap();
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["correctAnswer"], 0);
    }

    #[test]
    fn test_quiz_stats_thresholds() {
        let top = quiz_stats(9, 10).unwrap();
        assert_eq!(top.percentage, 90);
        assert_eq!(top.message, "Ajoyib! 🎉");
        assert_eq!(top.emoji, "🏆");

        assert_eq!(quiz_stats(7, 10).unwrap().emoji, "⭐");
        assert_eq!(quiz_stats(1, 2).unwrap().emoji, "📖");
        assert_eq!(quiz_stats(0, 5).unwrap().emoji, "💡");
        assert_eq!(quiz_stats(2, 3).unwrap().percentage, 67);
    }

    #[test]
    fn test_quiz_stats_rejects_bad_counts() {
        assert!(quiz_stats(1, 0).is_none());
        assert!(quiz_stats(11, 10).is_none());
    }
}
