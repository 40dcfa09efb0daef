use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct SessionRef {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Answer from the triggerQuiz/triggerAnnotation checks.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerCheck {
    #[serde(rename = "shouldTrigger", default)]
    pub should_trigger: bool,
}

/// A reading session row. The backend owns the interval bookkeeping; the
/// client only renders these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingSession {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "bookId")]
    pub book_id: Option<String>,
    #[serde(rename = "currentPage", default)]
    pub current_page: u32,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
    #[serde(rename = "quizInterval")]
    pub quiz_interval: Option<u32>,
    #[serde(rename = "annotationInterval")]
    pub annotation_interval: Option<u32>,
    #[serde(rename = "lastQuizPage")]
    pub last_quiz_page: Option<u32>,
    #[serde(rename = "lastAnnotationPage")]
    pub last_annotation_page: Option<u32>,
    pub status: Option<String>,
}

impl ReadingSession {
    pub fn is_paused(&self) -> bool {
        self.status.as_deref() == Some("paused")
    }

    /// Whole-number completion percentage, clamped to 100.
    pub fn percent_complete(&self) -> u32 {
        if self.total_pages == 0 {
            return 0;
        }
        (self.current_page * 100 / self.total_pages).min(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_complete() {
        let mut session = ReadingSession {
            session_id: "s1".to_string(),
            user_id: None,
            book_id: None,
            current_page: 50,
            total_pages: 200,
            quiz_interval: Some(10),
            annotation_interval: Some(15),
            last_quiz_page: None,
            last_annotation_page: None,
            status: Some("active".to_string()),
        };
        assert_eq!(session.percent_complete(), 25);
        assert!(!session.is_paused());

        session.current_page = 250; // past the end, clamp
        assert_eq!(session.percent_complete(), 100);

        session.total_pages = 0;
        assert_eq!(session.percent_complete(), 0);
    }
}
