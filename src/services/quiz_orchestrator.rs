use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        AnswerKey, AnswerOptions, ExplanationResult, QuizQuestion, QuizWorkflowOutcome, Topic,
    },
    services::{
        document_service::{TextExtractor, UploadStore},
        model_gateway::ModelGateway,
        prompt_builder, response_parser,
    },
};

pub const TOPIC_MAX_TOKENS: u32 = 1024;
pub const EXPLANATION_MAX_TOKENS: u32 = 512;

const QUIZ_BASE_MAX_TOKENS: u32 = 2000;
const QUIZ_TOKENS_PER_QUESTION: u32 = 400;
const QUIZ_MAX_TOKENS_CAP: u32 = 8192;

/// Output budget for a batch of `num_questions` questions.
pub fn quiz_max_tokens(num_questions: u32) -> u32 {
    num_questions
        .saturating_mul(QUIZ_TOKENS_PER_QUESTION)
        .clamp(QUIZ_BASE_MAX_TOKENS, QUIZ_MAX_TOKENS_CAP)
}

/// Sequences prompt building, the model round trip and response parsing.
///
/// Holds no per-request state; every call is independent.
pub struct QuizOrchestrator {
    gateway: Arc<dyn ModelGateway>,
    extractor: Arc<dyn TextExtractor>,
    uploads: UploadStore,
}

impl QuizOrchestrator {
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        extractor: Arc<dyn TextExtractor>,
        uploads: UploadStore,
    ) -> Self {
        Self {
            gateway,
            extractor,
            uploads,
        }
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    /// Lists the taught topics in document order. An empty list is not an error.
    pub async fn extract_topics(&self, syllabus_text: &str) -> AppResult<Vec<Topic>> {
        log::info!(
            "Extracting topics from {} character syllabus",
            syllabus_text.len()
        );

        let prompt = prompt_builder::build_topic_extraction_prompt(syllabus_text);
        let raw = self.gateway.complete(&prompt, TOPIC_MAX_TOKENS).await?;
        let topics = response_parser::parse_topics(&raw)?;

        if topics.is_empty() {
            log::warn!("Model found no taught topics in syllabus");
        } else {
            log::info!("Found {} topics", topics.len());
        }

        Ok(topics)
    }

    /// Generates exactly `num_questions` questions, optionally scoped to `topic`.
    pub async fn generate_quiz(
        &self,
        syllabus_text: &str,
        num_questions: u32,
        topic: Option<&str>,
    ) -> AppResult<Vec<QuizQuestion>> {
        if num_questions == 0 {
            return Err(AppError::InvalidInput(
                "num_questions must be a positive integer".to_string(),
            ));
        }

        log::info!(
            "Generating {} quiz questions for '{}'",
            num_questions,
            topic.unwrap_or("most recent material")
        );

        let prompt =
            prompt_builder::build_quiz_generation_prompt(syllabus_text, num_questions, topic);
        let raw = self
            .gateway
            .complete(&prompt, quiz_max_tokens(num_questions))
            .await?;
        let questions = response_parser::parse_questions(&raw)?;

        if questions.len() != num_questions as usize {
            log::warn!(
                "Model returned {} questions, {} were requested",
                questions.len(),
                num_questions
            );
            return Err(AppError::ParseError(format!(
                "expected {} questions, model returned {}",
                num_questions,
                questions.len()
            )));
        }

        Ok(questions)
    }

    /// Explains why `user_answer` is wrong and `correct_answer` is right.
    pub async fn explain_answer(
        &self,
        question: &str,
        options: &AnswerOptions,
        correct_answer: AnswerKey,
        user_answer: AnswerKey,
        topic: &str,
    ) -> AppResult<ExplanationResult> {
        log::info!(
            "Explaining answer {} (correct {}) for '{}'",
            user_answer,
            correct_answer,
            topic
        );

        let prompt = prompt_builder::build_explanation_prompt(
            question,
            options,
            correct_answer,
            user_answer,
            topic,
        );
        let raw = self.gateway.complete(&prompt, EXPLANATION_MAX_TOKENS).await?;
        response_parser::parse_explanation(&raw)
    }

    /// Stages the document, extracts its text and removes the staged file
    /// whether or not extraction succeeded.
    pub async fn extract_syllabus(&self, document: &[u8]) -> AppResult<String> {
        let staged = self.uploads.stage(document)?;
        let result = self.extractor.extract_text(staged.path()).await;
        staged.discard();

        if let Err(e) = &result {
            log::error!("Syllabus extraction failed: {}", e);
        }
        result
    }

    /// Document in, quiz out.
    ///
    /// Questions are scoped to `topic` when given, otherwise to the first
    /// extracted topic; with neither, the most recent material is used.
    pub async fn run_full_workflow(
        &self,
        document: &[u8],
        num_questions: u32,
        topic: Option<&str>,
    ) -> AppResult<QuizWorkflowOutcome> {
        log::info!("Step 1: reading syllabus ({} bytes)", document.len());
        let syllabus_text = self.extract_syllabus(document).await?;

        log::info!("Step 2: extracting topics");
        let topics = self.extract_topics(&syllabus_text).await?;

        let topic: Option<Topic> = topic
            .map(str::to_string)
            .or_else(|| topics.first().cloned());

        log::info!("Step 3: generating {} questions", num_questions);
        let questions = self
            .generate_quiz(&syllabus_text, num_questions, topic.as_deref())
            .await?;

        Ok(QuizWorkflowOutcome {
            syllabus_text,
            topics,
            topic,
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{document_service::MockTextExtractor, model_gateway::MockModelGateway},
        test_utils::fixtures::{questions_json, sample_options, PHYSICS_SYLLABUS},
    };
    use mockall::Sequence;

    fn orchestrator(
        gateway: MockModelGateway,
        extractor: MockTextExtractor,
        dir: &std::path::Path,
    ) -> QuizOrchestrator {
        QuizOrchestrator::new(
            Arc::new(gateway),
            Arc::new(extractor),
            UploadStore::new(dir).unwrap(),
        )
    }

    fn dir_is_empty(dir: &std::path::Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[test]
    fn test_quiz_max_tokens_scales_within_bounds() {
        assert_eq!(quiz_max_tokens(1), QUIZ_BASE_MAX_TOKENS);
        assert_eq!(quiz_max_tokens(10), 4000);
        assert_eq!(quiz_max_tokens(50), QUIZ_MAX_TOKENS_CAP);
        assert_eq!(quiz_max_tokens(u32::MAX), QUIZ_MAX_TOKENS_CAP);
    }

    #[actix_rt::test]
    async fn test_extract_topics_two_weeks() {
        let dir = tempfile::tempdir().unwrap();
        let mut gateway = MockModelGateway::new();
        gateway
            .expect_complete()
            .withf(|prompt, max| prompt.contains("Week 2: Energy and Work") && *max == TOPIC_MAX_TOKENS)
            .times(1)
            .returning(|_, _| {
                Ok("```json\n[\"Week 1: Newton's Laws\", \"Week 2: Energy and Work\"]\n```".to_string())
            });

        let service = orchestrator(gateway, MockTextExtractor::new(), dir.path());
        let topics = service.extract_topics(PHYSICS_SYLLABUS).await.unwrap();

        assert_eq!(
            topics,
            vec!["Week 1: Newton's Laws", "Week 2: Energy and Work"]
        );
    }

    #[actix_rt::test]
    async fn test_extract_topics_empty_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut gateway = MockModelGateway::new();
        gateway
            .expect_complete()
            .times(1)
            .returning(|_, _| Ok("[]".to_string()));

        let service = orchestrator(gateway, MockTextExtractor::new(), dir.path());
        let topics = service
            .extract_topics("Week 1: Spring break\nWeek 2: Final exam")
            .await
            .unwrap();

        assert!(topics.is_empty());
    }

    #[actix_rt::test]
    async fn test_generate_quiz_scoped_to_topic() {
        let dir = tempfile::tempdir().unwrap();
        let mut gateway = MockModelGateway::new();
        gateway
            .expect_complete()
            .withf(|prompt, max| {
                prompt.contains("\"Week 1: Newton's Laws\"")
                    && prompt.contains("exactly 3 questions")
                    && *max == quiz_max_tokens(3)
            })
            .times(1)
            .returning(|_, _| Ok(questions_json(3)));

        let service = orchestrator(gateway, MockTextExtractor::new(), dir.path());
        let questions = service
            .generate_quiz(PHYSICS_SYLLABUS, 3, Some("Week 1: Newton's Laws"))
            .await
            .unwrap();

        let ids: Vec<u32> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[actix_rt::test]
    async fn test_generate_quiz_rejects_zero_without_calling_model() {
        let dir = tempfile::tempdir().unwrap();
        let mut gateway = MockModelGateway::new();
        gateway.expect_complete().never();

        let service = orchestrator(gateway, MockTextExtractor::new(), dir.path());
        let err = service
            .generate_quiz(PHYSICS_SYLLABUS, 0, None)
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[actix_rt::test]
    async fn test_generate_quiz_rejects_short_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut gateway = MockModelGateway::new();
        gateway
            .expect_complete()
            .returning(|_, _| Ok(questions_json(2)));

        let service = orchestrator(gateway, MockTextExtractor::new(), dir.path());
        let err = service
            .generate_quiz(PHYSICS_SYLLABUS, 5, None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[actix_rt::test]
    async fn test_gateway_errors_propagate_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut gateway = MockModelGateway::new();
        gateway
            .expect_complete()
            .returning(|_, _| Err(AppError::ModelUnavailable("overloaded".to_string())));

        let service = orchestrator(gateway, MockTextExtractor::new(), dir.path());
        let err = service.extract_topics(PHYSICS_SYLLABUS).await.unwrap_err();

        assert!(matches!(err, AppError::ModelUnavailable(ref m) if m == "overloaded"));
    }

    #[actix_rt::test]
    async fn test_explain_answer_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut gateway = MockModelGateway::new();
        gateway
            .expect_complete()
            .withf(|prompt, max| {
                prompt.contains("Student's answer: B)") && *max == EXPLANATION_MAX_TOKENS
            })
            .times(1)
            .returning(|_, _| {
                Ok(r#"{"explanation": "An object at rest stays at rest."}"#.to_string())
            });

        let service = orchestrator(gateway, MockTextExtractor::new(), dir.path());
        let result = service
            .explain_answer(
                "Which law describes inertia?",
                &sample_options(),
                AnswerKey::A,
                AnswerKey::B,
                "Week 1: Newton's Laws",
            )
            .await
            .unwrap();

        assert_eq!(result.explanation, "An object at rest stays at rest.");
    }

    #[actix_rt::test]
    async fn test_extract_syllabus_removes_file_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut extractor = MockTextExtractor::new();
        extractor
            .expect_extract_text()
            .withf(|path| path.exists())
            .times(1)
            .returning(|_| Err(AppError::ExtractionFailure("corrupt".to_string())));

        let service = orchestrator(MockModelGateway::new(), extractor, dir.path());
        let err = service.extract_syllabus(b"%PDF-broken").await.unwrap_err();

        assert_eq!(err.error_code(), "EXTRACTION_FAILURE");
        assert!(dir_is_empty(dir.path()));
    }

    #[actix_rt::test]
    async fn test_full_workflow_uses_first_topic() {
        let dir = tempfile::tempdir().unwrap();
        let mut seq = Sequence::new();

        let mut extractor = MockTextExtractor::new();
        extractor
            .expect_extract_text()
            .times(1)
            .returning(|_| Ok(PHYSICS_SYLLABUS.to_string()));

        let mut gateway = MockModelGateway::new();
        gateway
            .expect_complete()
            .withf(|prompt, _| prompt.contains("list the distinct topics"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Ok(r#"["Week 1: Newton's Laws", "Week 2: Energy and Work"]"#.to_string())
            });
        gateway
            .expect_complete()
            .withf(|prompt, _| prompt.contains("specifically about the topic \"Week 1: Newton's Laws\""))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(questions_json(2)));

        let service = orchestrator(gateway, extractor, dir.path());
        let outcome = service.run_full_workflow(b"%PDF", 2, None).await.unwrap();

        assert_eq!(outcome.topics.len(), 2);
        assert_eq!(outcome.topic.as_deref(), Some("Week 1: Newton's Laws"));
        assert_eq!(outcome.questions.len(), 2);
        assert_eq!(outcome.syllabus_text, PHYSICS_SYLLABUS);
        assert!(dir_is_empty(dir.path()));
    }

    #[actix_rt::test]
    async fn test_full_workflow_explicit_topic_wins() {
        let dir = tempfile::tempdir().unwrap();

        let mut extractor = MockTextExtractor::new();
        extractor
            .expect_extract_text()
            .returning(|_| Ok(PHYSICS_SYLLABUS.to_string()));

        let mut gateway = MockModelGateway::new();
        gateway
            .expect_complete()
            .withf(|prompt, _| prompt.contains("list the distinct topics"))
            .returning(|_, _| Ok(r#"["Week 1: Newton's Laws"]"#.to_string()));
        gateway
            .expect_complete()
            .withf(|prompt, _| prompt.contains("\"Week 2: Energy and Work\""))
            .times(1)
            .returning(|_, _| Ok(questions_json(1)));

        let service = orchestrator(gateway, extractor, dir.path());
        let outcome = service
            .run_full_workflow(b"%PDF", 1, Some("Week 2: Energy and Work"))
            .await
            .unwrap();

        assert_eq!(outcome.topic.as_deref(), Some("Week 2: Energy and Work"));
    }

    #[actix_rt::test]
    async fn test_full_workflow_without_topics_uses_recent_material() {
        let dir = tempfile::tempdir().unwrap();

        let mut extractor = MockTextExtractor::new();
        extractor
            .expect_extract_text()
            .returning(|_| Ok("Week 1: Holiday".to_string()));

        let mut gateway = MockModelGateway::new();
        gateway
            .expect_complete()
            .withf(|prompt, _| prompt.contains("list the distinct topics"))
            .returning(|_, _| Ok("[]".to_string()));
        gateway
            .expect_complete()
            .withf(|prompt, _| prompt.contains("the most recently covered material"))
            .times(1)
            .returning(|_, _| Ok(questions_json(1)));

        let service = orchestrator(gateway, extractor, dir.path());
        let outcome = service.run_full_workflow(b"%PDF", 1, None).await.unwrap();

        assert!(outcome.topics.is_empty());
        assert!(outcome.topic.is_none());
    }

    #[actix_rt::test]
    async fn test_full_workflow_stops_when_extraction_fails() {
        let dir = tempfile::tempdir().unwrap();

        let mut extractor = MockTextExtractor::new();
        extractor
            .expect_extract_text()
            .returning(|_| Err(AppError::ExtractionFailure("unreadable".to_string())));

        let mut gateway = MockModelGateway::new();
        gateway.expect_complete().never();

        let service = orchestrator(gateway, extractor, dir.path());
        let err = service.run_full_workflow(b"junk", 3, None).await.unwrap_err();

        assert_eq!(err.error_code(), "EXTRACTION_FAILURE");
        assert!(dir_is_empty(dir.path()));
    }
}
