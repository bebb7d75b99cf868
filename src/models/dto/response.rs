use serde::Serialize;

use crate::models::domain::{QuizQuestion, Topic};

#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct UploadSyllabusResponse {
    pub topics: Vec<Topic>,
    pub syllabus_text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuizResponse {
    pub success: bool,
    pub questions: Vec<QuizQuestion>,
}

impl From<Vec<QuizQuestion>> for GenerateQuizResponse {
    fn from(questions: Vec<QuizQuestion>) -> Self {
        Self {
            success: true,
            questions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub success: bool,
    pub explanation: String,
}

impl From<String> for ExplainResponse {
    fn from(explanation: String) -> Self {
        Self {
            success: true,
            explanation,
        }
    }
}
