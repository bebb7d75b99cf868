use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::domain::{AnswerKey, AnswerOptions};

pub const DEFAULT_NUM_QUESTIONS: u32 = 5;
pub const MAX_NUM_QUESTIONS: u32 = 50;

fn default_num_questions() -> u32 {
    DEFAULT_NUM_QUESTIONS
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub syllabus_text: String,

    #[serde(default)]
    pub topic: Option<String>,

    #[serde(default = "default_num_questions")]
    #[validate(range(min = 1, max = MAX_NUM_QUESTIONS))]
    pub num_questions: u32,
}

impl GenerateQuizRequest {
    /// The topic scope, with a blank topic treated as no scope.
    pub fn topic(&self) -> Option<&str> {
        self.topic
            .as_deref()
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExplainRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub question: String,

    pub options: AnswerOptions,

    pub correct_answer: AnswerKey,

    pub user_answer: AnswerKey,

    pub topic: String,
}
