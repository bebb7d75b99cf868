//! Renders the three model prompts from typed inputs.
//!
//! Business rules (which weeks count as content, the question shape, the
//! explanation length) travel to the model as instructions; nothing here can
//! fail.

use crate::constants::prompts::{
    EDUCATOR_PREAMBLE, EXPLANATION_RULES, QUIZ_CONTENT_RULES, QUIZ_OUTPUT_CONTRACT,
    RECENT_MATERIAL_SCOPE, TOPIC_EXTRACTION_RULES,
};
use crate::models::domain::{AnswerKey, AnswerOptions};

/// Build the prompt that asks for the list of taught topics.
pub fn build_topic_extraction_prompt(syllabus_text: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(EDUCATOR_PREAMBLE);
    prompt.push_str("\n\n");
    prompt.push_str(TOPIC_EXTRACTION_RULES);
    prompt.push_str("\n\n# Course Syllabus\n\n");
    prompt.push_str(syllabus_text);
    prompt.push('\n');

    prompt
}

/// Build the prompt that asks for `num_questions` multiple-choice questions.
///
/// Without a topic the questions cover the most recently covered material.
/// `num_questions` is embedded as given; callers validate it.
pub fn build_quiz_generation_prompt(
    syllabus_text: &str,
    num_questions: u32,
    topic: Option<&str>,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(EDUCATOR_PREAMBLE);
    prompt.push_str("\n\n");

    match topic {
        Some(topic) => {
            prompt.push_str(&format!(
                "Generate {num_questions} multiple-choice quiz questions specifically about the topic \"{topic}\" from the course syllabus below.\n\
                 Every question must test material from \"{topic}\"; use the rest of the syllabus only as context.\n\n"
            ));
        }
        None => {
            prompt.push_str(&format!(
                "Generate {num_questions} multiple-choice quiz questions covering {RECENT_MATERIAL_SCOPE} in the course syllabus below.\n\n"
            ));
        }
    }

    prompt.push_str(QUIZ_CONTENT_RULES);
    prompt.push_str("\n\n# Course Syllabus\n\n");
    prompt.push_str(syllabus_text);
    prompt.push_str("\n\n");
    prompt.push_str(QUIZ_OUTPUT_CONTRACT);
    prompt.push_str(&format!(
        "\n\nThe array must contain exactly {num_questions} questions with ids 1 to {num_questions}.\n"
    ));

    prompt
}

/// Build the prompt that explains why `user_answer` was wrong.
pub fn build_explanation_prompt(
    question: &str,
    options: &AnswerOptions,
    correct_answer: AnswerKey,
    user_answer: AnswerKey,
    topic: &str,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(EDUCATOR_PREAMBLE);
    prompt.push_str(&format!(
        "\n\nA student answered a multiple-choice question on \"{topic}\" incorrectly.\n\n"
    ));
    prompt.push_str(&format!("# Question\n\n{question}\n\n# Options\n\n"));
    for (key, text) in options.iter() {
        prompt.push_str(&format!("{key}) {text}\n"));
    }
    prompt.push_str(&format!(
        "\nCorrect answer: {correct_answer}) {}\n",
        options.get(correct_answer)
    ));
    prompt.push_str(&format!(
        "Student's answer: {user_answer}) {}\n\n",
        options.get(user_answer)
    ));
    prompt.push_str(EXPLANATION_RULES);
    prompt.push('\n');

    prompt
}
