// src/search.rs
//! Keyword, location and checkbox filters plus pagination over the job list

use crate::types::{EmploymentType, JobRecord, WorkMode};

pub const DEFAULT_PER_PAGE: usize = 10;
pub const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Matched against title, company, description and skill labels
    pub keyword: Option<String>,
    /// Matched against location and state; anything mentioning "remote" also
    /// matches Remote jobs
    pub location: Option<String>,
    pub remote_only: bool,
    pub full_time_only: bool,
    pub contract_only: bool,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, job: &JobRecord) -> bool {
        if let Some(keyword) = normalized(&self.keyword) {
            let hit = [&job.title, &job.company, &job.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&keyword))
                || job
                    .skills
                    .iter()
                    .any(|skill| skill.to_lowercase().contains(&keyword));
            if !hit {
                return false;
            }
        }

        if let Some(location) = normalized(&self.location) {
            let hit = [&job.location, &job.state]
                .iter()
                .any(|field| field.to_lowercase().contains(&location))
                || (location.contains("remote") && job.work_mode == WorkMode::Remote);
            if !hit {
                return false;
            }
        }

        if self.remote_only && job.work_mode != WorkMode::Remote {
            return false;
        }
        if self.full_time_only && job.employment_type != EmploymentType::FullTime {
            return false;
        }
        if self.contract_only && job.employment_type != EmploymentType::Contract {
            return false;
        }

        true
    }

    /// Matching jobs in source order
    pub fn apply<'a>(&self, jobs: &'a [JobRecord]) -> Vec<&'a JobRecord> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }
}

fn normalized(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

/// Slice out one 1-based page. Out-of-range pages come back empty but keep the totals.
pub fn paginate<T>(items: Vec<T>, page: Option<usize>, per_page: Option<usize>) -> Page<T> {
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    let page = page.unwrap_or(1).max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);

    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    Page {
        items,
        total,
        page,
        total_pages,
    }
}
