use actix_web::{get, HttpResponse};

use crate::models::dto::response::ServiceInfoResponse;

#[get("/")]
pub async fn service_info() -> HttpResponse {
    HttpResponse::Ok().json(ServiceInfoResponse {
        message: "WeekLi API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
