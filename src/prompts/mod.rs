//! Prompt construction
//!
//! Each endpoint assembles a fresh prompt from the request fields. Prompts
//! end with a numbered bold outline (`**1. ...**`) so the answer renders as
//! sections, and with a directive pinning the answer language.

mod language;

use std::fmt::Write;

use serde::Serialize;

use crate::subject::Subject;

pub use language::Language;

/// Study assistant modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    Explain,
    Notes,
    Quiz,
    Plan,
    Mistakes,
    Flashcards,
    Script,
}

impl StudyMode {
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.trim().to_lowercase().as_str() {
            "explain" => Some(Self::Explain),
            "notes" => Some(Self::Notes),
            "quiz" => Some(Self::Quiz),
            "plan" => Some(Self::Plan),
            "mistakes" => Some(Self::Mistakes),
            "flashcards" => Some(Self::Flashcards),
            "script" => Some(Self::Script),
            _ => None,
        }
    }
}

/// Speaking exam formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamType {
    Ielts,
    Cefr,
    General,
}

impl ExamType {
    pub fn parse(exam: Option<&str>) -> Self {
        match exam.map(|e| e.trim().to_lowercase()).as_deref() {
            Some("ielts") => Self::Ielts,
            Some("cefr") | Some("multilevel") => Self::Cefr,
            _ => Self::General,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(difficulty: Option<&str>) -> Self {
        match difficulty.map(|d| d.trim().to_lowercase()).as_deref() {
            Some("easy") => Self::Easy,
            Some("hard") => Self::Hard,
            _ => Self::Medium,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

fn outline(sections: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (i, (title, hint)) in sections.iter().enumerate() {
        let _ = writeln!(out, "**{}. {}:**\n{}\n", i + 1, title, hint);
    }
    out
}

fn finish(mut prompt: String, language: Language) -> String {
    prompt.push('\n');
    prompt.push_str(language.answer_directive());
    prompt
}

const HOMEWORK_SECTIONS: &[(&str, &str)] = &[
    ("CHECK RESULT", "Is the task correct or incorrect."),
    ("CORRECT ANSWER", "Complete answer."),
    ("FORMULA/RULE", "Which formula or rule was used."),
    ("STEP-BY-STEP SOLUTION", "Each step separately."),
    ("WHY IT'S LIKE THIS", "Logical reasoning."),
    ("SIMILAR EXAMPLE", "Another example."),
    ("TIP", "Advice for skill development."),
];

/// Homework check; `homework` is `None` when the task arrives as an image
pub fn homework(language: Language, homework: Option<&str>, subject: Option<Subject>) -> String {
    let mut prompt = String::from("You are a professional teacher and subject expert.\n\n");
    if let Some(subject) = subject.filter(|s| *s != Subject::General) {
        let _ = writeln!(prompt, "SUBJECT: {}\n", subject.as_str());
    }
    match homework {
        Some(text) => {
            let _ = writeln!(prompt, "📝 HOMEWORK:\n{}\n", text.trim());
        }
        None => prompt.push_str("Check the homework shown in the image and explain it in detail.\n\n"),
    }
    prompt.push_str("📋 IN YOUR ANSWER INCLUDE:\n\n");
    prompt.push_str(&outline(HOMEWORK_SECTIONS));
    finish(prompt, language)
}

pub fn grammar(language: Language, text: &str) -> String {
    let mut prompt = format!(
        "You are a professional grammar expert.\n\nTEXT:\n{}\n\nPROVIDE YOUR ANSWER LIKE THIS:\n\n",
        text.trim()
    );
    prompt.push_str(&outline(&[
        ("ERRORS", "List the errors found."),
        ("CORRECTED TEXT", "Fully corrected text."),
        ("EXPLANATIONS", "Explain why each error was corrected."),
        ("TIPS", "Tips to avoid these errors."),
    ]));
    finish(prompt, language)
}

pub fn writing(language: Language, text: &str, task_type: Option<&str>, topic: Option<&str>) -> String {
    let mut prompt = String::from(
        "You are a certified IELTS and CEFR writing examiner. Evaluate the essay below.\n\n",
    );
    if let Some(task) = task_type {
        let _ = writeln!(prompt, "TASK TYPE: {}", task.trim());
    }
    if let Some(topic) = topic {
        let _ = writeln!(prompt, "TOPIC: {}", topic.trim());
    }
    let _ = writeln!(prompt, "\nESSAY:\n{}\n", text.trim());
    prompt.push_str(&outline(&[
        ("OVERALL BAND", "Estimated band score (0-9) and CEFR level."),
        ("TASK RESPONSE", "How fully the task is answered."),
        ("COHERENCE AND COHESION", "Organisation and linking."),
        ("LEXICAL RESOURCE", "Vocabulary range and accuracy."),
        ("GRAMMATICAL RANGE", "Grammar range and accuracy with corrected examples."),
        ("IMPROVED VERSION", "A rewritten paragraph showing improvements."),
        ("NEXT STEPS", "Three concrete actions to raise the score."),
    ]));
    finish(prompt, language)
}

pub fn vocabulary(language: Language, word: &str) -> String {
    let mut prompt = format!(
        "You are a dictionary expert. Provide complete information about the following word:\n\nWORD: {}\n\nIN YOUR ANSWER INCLUDE:\n\n",
        word.trim()
    );
    prompt.push_str(&outline(&[
        ("MEANING", "Main definition of the word."),
        ("PRONUNCIATION", "Pronunciation in a simple readable form."),
        ("PART OF SPEECH", "Noun, verb, adjective, etc."),
        ("EXAMPLES", "At least 3 example sentences."),
        ("SYNONYMS", "Words with similar meanings."),
        ("ANTONYMS", "Words with opposite meanings."),
        ("MEMORY TIP", "An easy way to remember the word."),
    ]));
    finish(prompt, language)
}

/// Short definition for a word met while reading an article
pub fn article_vocabulary(language: Language, word: &str) -> String {
    let mut prompt = format!(
        "A learner is reading an English article and does not know this word: {}\n\nGive a short, clear explanation:\n\n",
        word.trim()
    );
    prompt.push_str(&outline(&[
        ("MEANING", "One-sentence definition."),
        ("TRANSLATION", "Translation into the answer language."),
        ("EXAMPLE", "One example sentence."),
    ]));
    finish(prompt, language)
}

pub fn quiz(language: Language, article: &str, question_count: u32, difficulty: Difficulty) -> String {
    let mut prompt = format!(
        "You are a professional test creator. Create {} {} level multiple-choice questions from the following text.\n\n",
        question_count,
        difficulty.as_str()
    );
    prompt.push_str(
        "📋 RULES:\n\
         - Each question has exactly 4 options\n\
         - Mark the correct answer as an index from 0 to 3\n\
         - Add a short explanation to each question\n\
         - Questions must follow the text content\n\n",
    );
    let _ = writeln!(prompt, "📖 TEXT:\n{}\n", article.trim());
    prompt.push_str(
        "EXAMPLE:\n{\n  \"questions\": [\n    {\n      \"question\": \"Question text?\",\n      \"options\": [\"Option A\", \"Option B\", \"Option C\", \"Option D\"],\n      \"correctAnswer\": 0,\n      \"explanation\": \"This is correct because...\"\n    }\n  ]\n}\n\n",
    );
    let _ = writeln!(
        prompt,
        "Write the questions, options and explanations in {}.",
        language.name()
    );
    prompt.push_str("⚠️ RESPOND ONLY WITH JSON, NO MARKDOWN AND NO OTHER TEXT!");
    prompt
}

pub fn study(language: Language, mode: StudyMode, content: &str) -> String {
    let (task, sections): (&str, &[(&str, &str)]) = match mode {
        StudyMode::Explain => (
            "Explain the topic below simply, as a patient tutor.",
            &[
                ("SIMPLE EXPLANATION", "Plain-language explanation."),
                ("KEY IDEAS", "The main points as bullets."),
                ("EXAMPLE", "A concrete example."),
                ("CHECK YOURSELF", "Two short questions."),
            ],
        ),
        StudyMode::Notes => (
            "Turn the material below into concise study notes.",
            &[
                ("SUMMARY", "Three-sentence summary."),
                ("KEY TERMS", "Terms with definitions."),
                ("MAIN POINTS", "Bulleted notes."),
            ],
        ),
        StudyMode::Quiz => (
            "Write a short practice quiz on the material below.",
            &[
                ("QUESTIONS", "Five questions."),
                ("ANSWERS", "Answers with one-line explanations."),
            ],
        ),
        StudyMode::Plan => (
            "Create a study plan for the goal below.",
            &[
                ("GOAL", "Restated goal."),
                ("WEEKLY PLAN", "Day-by-day schedule."),
                ("RESOURCES", "Recommended resources."),
                ("PROGRESS CHECKS", "How to measure progress."),
            ],
        ),
        StudyMode::Mistakes => (
            "Analyse the mistakes in the work below.",
            &[
                ("MISTAKES FOUND", "Each mistake as a bullet."),
                ("CORRECTIONS", "Corrected versions."),
                ("WHY THEY HAPPEN", "Underlying misconceptions."),
                ("PRACTICE", "Exercises targeting these mistakes."),
            ],
        ),
        StudyMode::Flashcards => (
            "Create flashcards from the material below.",
            &[("FLASHCARDS", "Ten cards, each as '- Front — Back'.")],
        ),
        StudyMode::Script => (
            "Write a short presentation script on the topic below.",
            &[
                ("INTRODUCTION", "Opening lines."),
                ("MAIN PART", "Body of the talk."),
                ("CONCLUSION", "Closing lines."),
            ],
        ),
    };

    let mut prompt = format!("{}\n\nMATERIAL:\n{}\n\n", task, content.trim());
    prompt.push_str(&outline(sections));
    finish(prompt, language)
}

pub fn speaking(language: Language, transcript: &str, topic: Option<&str>, exam: ExamType) -> String {
    let examiner = match exam {
        ExamType::Ielts => "an IELTS speaking examiner. Use the 0-9 band descriptors",
        ExamType::Cefr => "a CEFR speaking examiner. Use levels A1-C2",
        ExamType::General => "an experienced English speaking coach",
    };
    let mut prompt = format!("You are {}.\n\n", examiner);
    if let Some(topic) = topic {
        let _ = writeln!(prompt, "TOPIC: {}", topic.trim());
    }
    let _ = writeln!(prompt, "TRANSCRIPT OF THE CANDIDATE:\n{}\n", transcript.trim());
    prompt.push_str(&outline(&[
        ("OVERALL SCORE", "Estimated score or level."),
        ("FLUENCY AND COHERENCE", "Assessment with examples."),
        ("LEXICAL RESOURCE", "Vocabulary assessment."),
        ("GRAMMAR", "Grammar assessment with corrections."),
        ("PRONUNCIATION HINTS", "What can be inferred from the transcript."),
        ("BETTER ANSWER", "An improved model answer."),
        ("PRACTICE TIPS", "Concrete next steps."),
    ]));
    finish(prompt, language)
}

pub fn article_summary(language: Language, title: Option<&str>, article: &str, user_summary: &str) -> String {
    let mut prompt = String::from("You are an English reading teacher grading a learner's summary.\n\n");
    if let Some(title) = title {
        let _ = writeln!(prompt, "ARTICLE TITLE: {}", title.trim());
    }
    let _ = writeln!(prompt, "ARTICLE:\n{}\n", article.trim());
    let _ = writeln!(prompt, "LEARNER'S SUMMARY:\n{}\n", user_summary.trim());
    prompt.push_str(&outline(&[
        ("SCORE", "Write exactly 'SCORE: N/10' where N is 0-10."),
        ("WHAT IS GOOD", "Strengths of the summary."),
        ("MISSING IDEAS", "Key points the learner missed."),
        ("LANGUAGE", "Grammar and vocabulary corrections."),
        ("MODEL SUMMARY", "A short model summary."),
    ]));
    finish(prompt, language)
}
