// src/web/handlers/system_handlers.rs
use crate::web::types::{ErrorResponse, NotFoundResponse};

use rocket::serde::json::Json;
use tracing::debug;

pub async fn health_handler() -> Json<&'static str> {
    debug!("Health check");
    Json("OK")
}

pub fn not_found_handler() -> Json<NotFoundResponse> {
    Json(NotFoundResponse {
        error: "Not found".to_string(),
    })
}

pub fn internal_error_handler() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Internal server error",
        "Try again in a few moments",
    ))
}
