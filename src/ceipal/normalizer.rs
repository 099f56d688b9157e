// src/ceipal/normalizer.rs
//! Keyword heuristics deriving job type, work mode, salary band, skills and icon from a raw record

use crate::types::{EmploymentType, JobRecord, RawJobRecord, WorkMode};
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

const DEFAULT_SALARY: &str = "$80K - $130K";
const DEFAULT_ICON: &str = "fa-code";
const DEFAULT_ICON_COLOR: &str = "from-blue-100 to-blue-200";
const DEFAULT_STATUS: &str = "Active";

// Checked in order, first tier with a matching keyword wins
const SALARY_TIERS: &[(&[&str], &str)] = &[
    (&["senior", "lead", "principal"], "$120K - $180K"),
    (&["engineer", "developer", "architect"], "$90K - $140K"),
    (&["junior", "associate"], "$60K - $90K"),
];

const SKILLS: &[(&str, &str)] = &[
    ("angular", "Angular"),
    ("react", "React"),
    ("node", "Node.js"),
    ("python", "Python"),
    ("java", "Java"),
    ("aws", "AWS"),
    ("azure", "Azure"),
    ("devops", "DevOps"),
    ("kubernetes", "Kubernetes"),
    ("docker", "Docker"),
    ("sql", "SQL"),
    ("nosql", "NoSQL"),
    ("security", "Security"),
    ("cloud", "Cloud"),
    ("frontend", "Frontend"),
    ("backend", "Backend"),
    ("fullstack", "Full Stack"),
    ("mobile", "Mobile"),
    ("ios", "iOS"),
    ("android", "Android"),
    ("data", "Data Engineering"),
    ("ml", "Machine Learning"),
    ("ai", "AI"),
];

const ICONS: &[(&[&str], &str)] = &[
    (&["frontend", "angular", "react"], "fa-code"),
    (&["mobile", "ios", "android"], "fa-mobile-screen-button"),
    (&["data", "database"], "fa-database"),
    (&["security", "cybersecurity"], "fa-shield-halved"),
    (&["cloud", "devops"], "fa-cloud"),
    (&["architect"], "fa-sitemap"),
];

const ICON_COLORS: &[(&[&str], &str)] = &[
    (&["frontend", "angular", "react"], "from-blue-100 to-blue-200"),
    (&["mobile"], "from-purple-100 to-purple-200"),
    (&["data"], "from-green-100 to-green-200"),
    (&["security"], "from-red-100 to-red-200"),
];

/// Build the canonical record for one raw listing.
///
/// Deterministic in its inputs: `captured_at` stands in for a missing posted
/// date, and a record with neither id nor job code gets an id derived from its
/// content, so normalizing the same row twice yields the same record.
pub fn normalize_job(raw: &RawJobRecord, captured_at: DateTime<Utc>, default_company: &str) -> JobRecord {
    let title = raw.title.clone().unwrap_or_default();
    let location = raw.location.clone().unwrap_or_default();
    let title_lower = title.to_lowercase();
    let location_lower = location.to_lowercase();

    JobRecord {
        id: raw
            .id
            .clone()
            .or_else(|| raw.job_code.clone())
            .unwrap_or_else(|| content_id(raw)),
        job_code: raw.job_code.clone().unwrap_or_default(),
        company: raw
            .client
            .clone()
            .or_else(|| raw.business_unit.clone())
            .unwrap_or_else(|| default_company.to_string()),
        state: raw.state.clone().unwrap_or_default(),
        employment_type: employment_type(&title_lower),
        work_mode: work_mode(&title_lower, &location_lower),
        description: raw
            .description
            .clone()
            .unwrap_or_else(|| format!("Opportunity for {}", title)),
        salary: raw
            .salary
            .clone()
            .unwrap_or_else(|| salary_band(&title_lower).to_string()),
        status: raw
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        posted_date: raw
            .posted_date
            .clone()
            .unwrap_or_else(|| captured_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        applicant_count: raw.applicants.unwrap_or(0),
        skills: skills(&title_lower),
        icon: first_match(ICONS, &title_lower, DEFAULT_ICON).to_string(),
        icon_color: first_match(ICON_COLORS, &title_lower, DEFAULT_ICON_COLOR).to_string(),
        title,
        location,
    }
}

pub fn employment_type(title_lower: &str) -> EmploymentType {
    if title_lower.contains("contract") || title_lower.contains("temporary") {
        EmploymentType::Contract
    } else if title_lower.contains("part-time") {
        EmploymentType::PartTime
    } else {
        EmploymentType::FullTime
    }
}

pub fn work_mode(title_lower: &str, location_lower: &str) -> WorkMode {
    let mentions = |keyword: &str| location_lower.contains(keyword) || title_lower.contains(keyword);

    if mentions("remote") {
        WorkMode::Remote
    } else if mentions("hybrid") {
        WorkMode::Hybrid
    } else {
        WorkMode::OnSite
    }
}

pub fn salary_band(title_lower: &str) -> &'static str {
    first_match(SALARY_TIERS, title_lower, DEFAULT_SALARY)
}

pub fn skills(title_lower: &str) -> Vec<String> {
    SKILLS
        .iter()
        .filter(|(keyword, _)| title_lower.contains(keyword))
        .map(|(_, label)| label.to_string())
        .collect()
}

fn first_match(table: &[(&[&str], &'static str)], text: &str, default: &'static str) -> &'static str {
    table
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(_, value)| *value)
        .unwrap_or(default)
}

fn content_id(raw: &RawJobRecord) -> String {
    let fields = [
        &raw.title,
        &raw.location,
        &raw.state,
        &raw.client,
        &raw.business_unit,
        &raw.client_job_id,
    ];
    let name = fields
        .iter()
        .map(|field| field.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\u{1f}");

    let uuid = Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes());
    format!("job-{}", &uuid.simple().to_string()[..12])
}
