pub mod quiz;
pub mod quiz_question;
pub use quiz::{ExplanationResult, QuizWorkflowOutcome, Topic};
pub use quiz_question::{AnswerKey, AnswerOptions, QuizQuestion};
