// src/types/job.rs
//! Job listing data structures shared by the portal client, cache and web layer

use serde::{Deserialize, Serialize};

// ===== Raw portal rows =====

/// One listing as read from the portal, before normalization.
///
/// Every field is optional: the portal markup and JSON shape are undocumented,
/// so whatever could not be read stays `None` and the normalizer picks a default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawJobRecord {
    pub id: Option<String>,
    pub job_code: Option<String>,
    pub title: Option<String>,
    pub business_unit: Option<String>,
    pub client: Option<String>,
    pub client_job_id: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub salary: Option<String>,
    pub posted_date: Option<String>,
    pub applicants: Option<u32>,
}

// ===== Canonical job record =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkMode {
    #[serde(rename = "Remote")]
    Remote,
    #[serde(rename = "Hybrid")]
    Hybrid,
    #[serde(rename = "On-Site")]
    OnSite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub job_code: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub state: String,
    #[serde(rename = "type")]
    pub employment_type: EmploymentType,
    pub work_mode: WorkMode,
    pub description: String,
    pub salary: String,
    pub status: String,
    pub posted_date: String,
    pub applicant_count: u32,
    pub skills: Vec<String>,
    pub icon: String,
    pub icon_color: String,
}
