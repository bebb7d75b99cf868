pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::errors::AppError;

pub use health_handler::{health_check, service_info};
pub use quiz_handler::{explain_answer, generate_quiz, upload_syllabus};

/// Syllabus text travels in JSON bodies, so the default 32 KiB limit is too small.
pub const MAX_JSON_BYTES: usize = 4 * 1024 * 1024;

/// JSON extractor settings: larger body limit, and decode failures reported
/// as `InvalidInput` in the standard error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_BYTES)
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

/// Registers every route of the API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(service_info)
        .service(health_check)
        .service(upload_syllabus)
        .service(generate_quiz)
        .service(explain_answer);
}
