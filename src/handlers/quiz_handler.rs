use actix_multipart::Multipart;
use actix_web::{post, web, HttpRequest, HttpResponse};
use futures::TryStreamExt;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    middleware::get_request_id,
    models::dto::{
        request::{ExplainRequest, GenerateQuizRequest},
        response::{ExplainResponse, GenerateQuizResponse, UploadSyllabusResponse},
    },
    services::document_service::is_pdf_filename,
};

/// Reads the first uploaded file of a multipart body.
///
/// Non-PDF filenames are rejected before any bytes are read.
async fn read_pdf_upload(payload: &mut Multipart, max_bytes: usize) -> AppResult<(String, Vec<u8>)> {
    while let Some(mut field) = payload.try_next().await? {
        let Some(filename) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
        else {
            continue;
        };

        if !is_pdf_filename(&filename) {
            return Err(AppError::InvalidInput(
                "Only PDF files are allowed.".to_string(),
            ));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::InvalidInput(format!(
                    "File exceeds the {} byte upload limit",
                    max_bytes
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok((filename, bytes));
    }

    Err(AppError::InvalidInput("No file was uploaded.".to_string()))
}

#[post("/api/upload-syllabus")]
pub async fn upload_syllabus(
    state: web::Data<AppState>,
    req: HttpRequest,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let request_id = get_request_id(&req);
    let (filename, document) = read_pdf_upload(&mut payload, state.config.max_upload_bytes).await?;
    log::info!("[{}] Received syllabus '{}' ({} bytes)", request_id, filename, document.len());

    let syllabus_text = state.orchestrator.extract_syllabus(&document).await?;
    let topics = state.orchestrator.extract_topics(&syllabus_text).await?;

    Ok(HttpResponse::Ok().json(UploadSyllabusResponse {
        topics,
        syllabus_text,
    }))
}

#[post("/api/generate-quiz")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    log::info!(
        "[{}] Generating {} questions",
        get_request_id(&req),
        request.num_questions
    );

    let questions = state
        .orchestrator
        .generate_quiz(&request.syllabus_text, request.num_questions, request.topic())
        .await?;

    Ok(HttpResponse::Ok().json(GenerateQuizResponse::from(questions)))
}

#[post("/api/explain")]
pub async fn explain_answer(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<ExplainRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    log::info!("[{}] Explaining answer for '{}'", get_request_id(&req), request.topic);

    let result = state
        .orchestrator
        .explain_answer(
            &request.question,
            &request.options,
            request.correct_answer,
            request.user_answer,
            &request.topic,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ExplainResponse::from(result.explanation)))
}
