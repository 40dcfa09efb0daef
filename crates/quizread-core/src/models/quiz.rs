use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct QuizRef {
    #[serde(rename = "quizId")]
    pub quiz_id: String,
}

/// Context extraction result. The backend reports extraction problems in
/// the `error` field rather than with an HTTP failure.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizContext {
    pub content: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(rename = "quizId")]
    pub quiz_id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerResult {
    #[serde(rename = "attemptId")]
    pub attempt_id: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    #[serde(rename = "attemptId")]
    pub attempt_id: String,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "quizId")]
    pub quiz_id: Option<String>,
    #[serde(rename = "selectedIndex")]
    pub selected_index: Option<u32>,
    #[serde(rename = "isCorrect", default)]
    pub is_correct: bool,
    #[serde(rename = "attemptedAt")]
    pub attempted_at: Option<String>,
}
