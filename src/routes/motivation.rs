//! Motivational quote endpoint

use axum::{routing::get, Json, Router};
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::state::AppState;

const QUOTES: &[(&str, &str)] = &[
    ("🌟 The expert in anything was once a beginner.", "Helen Hayes"),
    ("💪 It always seems impossible until it's done.", "Nelson Mandela"),
    ("🚀 The secret of getting ahead is getting started.", "Mark Twain"),
    ("📚 Education is the most powerful weapon which you can use to change the world.", "Nelson Mandela"),
    ("🎯 Success is the sum of small efforts, repeated day in and day out.", "Robert Collier"),
    ("💡 Live as if you were to die tomorrow. Learn as if you were to live forever.", "Mahatma Gandhi"),
    ("🔥 Don't watch the clock; do what it does. Keep going.", "Sam Levenson"),
    ("⭐ Ilm izlash har bir musulmonga farzdir.", "Hadis"),
    ("🎓 The beautiful thing about learning is that no one can take it away from you.", "B.B. King"),
    ("🌈 Believe you can and you're halfway there.", "Theodore Roosevelt"),
    ("✨ An investment in knowledge pays the best interest.", "Benjamin Franklin"),
    ("🏆 Quality is not an act, it is a habit.", "Aristotle"),
    ("📖 Ilm olish igna bilan quduq qazishdek gap.", "O'zbek xalq maqoli"),
    ("💫 It does not matter how slowly you go as long as you do not stop.", "Confucius"),
    ("🎨 Creativity is intelligence having fun.", "Albert Einstein"),
];

#[derive(Debug, Serialize)]
pub struct MotivationResponse {
    pub success: bool,
    pub quote: &'static str,
    pub author: &'static str,
}

fn random_quote() -> (&'static str, &'static str) {
    QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(QUOTES[0])
}

async fn motivation() -> Json<MotivationResponse> {
    let (quote, author) = random_quote();
    Json(MotivationResponse {
        success: true,
        quote,
        author,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/motivation", get(motivation))
}
