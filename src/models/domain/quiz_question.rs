use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four answer letters of a multiple-choice question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    pub const ALL: [AnswerKey; 4] = [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKey::A => "A",
            AnswerKey::B => "B",
            AnswerKey::C => "C",
            AnswerKey::D => "D",
        }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The option texts of a question, keyed by letter.
///
/// Exactly the keys `A`..`D` are accepted when decoding, and they always
/// serialize in that order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerOptions {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl AnswerOptions {
    pub fn get(&self, key: AnswerKey) -> &str {
        match key {
            AnswerKey::A => &self.a,
            AnswerKey::B => &self.b,
            AnswerKey::C => &self.c,
            AnswerKey::D => &self.d,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnswerKey, &str)> {
        AnswerKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

/// A generated question. Extra keys on the question are ignored; the options
/// object stays strict.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String, // may contain $...$ or $$...$$ math markup
    pub options: AnswerOptions,
    pub answer: AnswerKey,
}

impl QuizQuestion {
    /// Renders the question in the plain-text layout:
    ///
    /// ```text
    /// Question 1: ...
    /// A) ...
    /// B) ...
    /// C) ...
    /// D) ...
    /// Answer: B
    /// ```
    pub fn to_plain_text(&self) -> String {
        let mut text = format!("Question {}: {}\n", self.id, self.question);
        for (key, option) in self.options.iter() {
            text.push_str(&format!("{}) {}\n", key, option));
        }
        text.push_str(&format!("Answer: {}", self.answer));
        text
    }
}

/// Renders a whole batch in the plain-text layout, one blank line between questions.
pub fn quiz_to_plain_text(questions: &[QuizQuestion]) -> String {
    questions
        .iter()
        .map(QuizQuestion::to_plain_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}
