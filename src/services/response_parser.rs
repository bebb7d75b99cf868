//! Turns raw model output into validated structured values.
//!
//! Models often wrap the JSON payload in a markdown code fence; a leading
//! fence line (optionally tagged, e.g. `json`) and a trailing fence line are
//! stripped before decoding.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{ExplanationResult, QuizQuestion, Topic};

static OPENING_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^```[A-Za-z0-9_+-]*[ \t]*(?:\r?\n|$)").expect("OPENING_FENCE is a valid regex pattern")
});

static CLOSING_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\r?\n)[ \t]*```$").expect("CLOSING_FENCE is a valid regex pattern")
});

/// Remove surrounding whitespace and markdown code-fence lines.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();

    let body = match OPENING_FENCE.find(trimmed) {
        Some(fence) => &trimmed[fence.end()..],
        None => trimmed,
    };

    let body = match CLOSING_FENCE.find(body) {
        Some(fence) => &body[..fence.start()],
        None => body,
    };

    body.trim()
}

fn decode<T: DeserializeOwned>(raw: &str, expected: &str) -> AppResult<T> {
    let payload = strip_code_fence(raw);

    serde_json::from_str(payload).map_err(|e| {
        log::warn!(
            "Model output did not decode as {} ({} chars): {}",
            expected,
            raw.len(),
            e
        );
        AppError::ParseError(format!("expected {}: {}", expected, e))
    })
}

/// Decode a JSON array of topic labels, preserving order and duplicates.
pub fn parse_topics(raw: &str) -> AppResult<Vec<Topic>> {
    decode(raw, "a JSON array of topic strings")
}

/// Decode a JSON array of questions and check their ids run 1..=n.
pub fn parse_questions(raw: &str) -> AppResult<Vec<QuizQuestion>> {
    let questions: Vec<QuizQuestion> = decode(raw, "a JSON array of question objects")?;

    for (index, question) in questions.iter().enumerate() {
        let expected_id = index as u32 + 1;
        if question.id != expected_id {
            log::warn!(
                "Question at position {} has id {}, expected {}",
                index,
                question.id,
                expected_id
            );
            return Err(AppError::ParseError(format!(
                "question ids must be sequential from 1: found id {} at position {}",
                question.id, expected_id
            )));
        }
    }

    Ok(questions)
}

/// Decode a JSON object with an `explanation` string field.
pub fn parse_explanation(raw: &str) -> AppResult<ExplanationResult> {
    decode(raw, "a JSON object with an explanation field")
}
