// src/web/types.rs
use crate::types::JobRecord;
use rocket::form::FromForm;
use rocket::serde::Serialize;

/// Query string accepted by `GET /api/jobs`. Every field is optional; with none
/// set the full list is returned unpaginated.
#[derive(Debug, Default, FromForm)]
pub struct JobQuery {
    pub q: Option<String>,
    pub location: Option<String>,
    pub remote: Option<bool>,
    pub fulltime: Option<bool>,
    pub contract: Option<bool>,
    pub page: Option<usize>,
    #[field(name = "perPage")]
    pub per_page: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct JobsResponse {
    pub success: bool,
    pub data: Vec<JobRecord>,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
}

impl JobsResponse {
    pub fn new(data: Vec<JobRecord>) -> Self {
        Self {
            success: true,
            data,
            cached: false,
            cache_age: None,
            stale: None,
            error: None,
            timestamp: None,
            total: None,
            page: None,
            total_pages: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct NotFoundResponse {
    pub error: String,
}
