use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::QuizQuestion;

/// A short label for one unit of taught content, e.g. "Week 1: Newton's Laws".
pub type Topic = String;

/// Result of running the whole document-to-quiz workflow.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizWorkflowOutcome {
    pub syllabus_text: String,
    pub topics: Vec<Topic>,
    pub topic: Option<Topic>, // the scope the questions were generated for
    pub questions: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExplanationResult {
    pub explanation: String,
}
