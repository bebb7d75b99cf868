#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::AnswerOptions;

    pub const PHYSICS_SYLLABUS: &str = "Physics 101 - Introduction to Mechanics

Week 1: Newton's Laws of Motion
- First Law (Inertia)
- Second Law (F=ma)
- Third Law (Action-Reaction)

Week 2: Energy and Work
- Kinetic Energy
- Potential Energy
- Conservation of Energy
";

    /// Options for a question about Newton's first law; `A` is correct.
    pub fn sample_options() -> AnswerOptions {
        AnswerOptions {
            a: "Newton's first law".to_string(),
            b: "Newton's second law".to_string(),
            c: "Newton's third law".to_string(),
            d: "Conservation of energy".to_string(),
        }
    }

    /// Model output for `count` well-formed questions with ids 1..=count.
    pub fn questions_json(count: u32) -> String {
        let questions: Vec<String> = (1..=count)
            .map(|id| {
                format!(
                    r#"{{"id": {id}, "question": "Question {id}: what is $F$ when $m = {id}$ kg and $a = 2$ m/s$^2$?", "options": {{"A": "{a} N", "B": "{b} N", "C": "{c} N", "D": "{d} N"}}, "answer": "A"}}"#,
                    a = id * 2,
                    b = id + 2,
                    c = id * 4,
                    d = id,
                )
            })
            .collect();

        format!("[{}]", questions.join(", "))
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents a client error (4xx)
    pub fn assert_client_error(status: StatusCode) {
        assert!(
            status.is_client_error(),
            "Expected client error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_questions_json_is_well_formed() {
        let value: serde_json::Value = serde_json::from_str(&questions_json(3)).unwrap();
        let items = value.as_array().unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[2]["id"], 3);
        assert_eq!(items[0]["answer"], "A");
    }

    #[test]
    fn test_fixtures_syllabus_has_two_weeks() {
        assert_eq!(PHYSICS_SYLLABUS.matches("Week ").count(), 2);
    }
}
