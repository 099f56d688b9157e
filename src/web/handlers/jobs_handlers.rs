// src/web/handlers/jobs_handlers.rs
use crate::cache::{Freshness, JobCache, STALE_NOTE};
use crate::search::{paginate, JobFilter};
use crate::types::JobRecord;
use crate::web::types::{ErrorResponse, JobQuery, JobsResponse};

use chrono::SecondsFormat;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use tracing::{error, info};

pub async fn list_jobs_handler(
    query: JobQuery,
    cache: &JobCache,
) -> Result<Json<JobsResponse>, Custom<Json<ErrorResponse>>> {
    let lookup = match cache.get().await {
        Ok(lookup) => lookup,
        Err(e) => {
            error!("Error fetching jobs: {}", e);
            return Err(Custom(
                Status::InternalServerError,
                Json(ErrorResponse::new("Failed to fetch jobs", e.to_string())),
            ));
        }
    };

    let filter = filter_from_query(&query);
    let selected: Vec<JobRecord> = if filter.is_empty() {
        lookup.jobs.as_ref().clone()
    } else {
        filter.apply(&lookup.jobs).into_iter().cloned().collect()
    };

    let mut response = if query.page.is_some() || query.per_page.is_some() {
        let page = paginate(selected, query.page, query.per_page);
        let mut response = JobsResponse::new(page.items);
        response.total = Some(page.total);
        response.page = Some(page.page);
        response.total_pages = Some(page.total_pages);
        response
    } else {
        JobsResponse::new(selected)
    };

    match lookup.freshness {
        Freshness::Cached { age } => {
            info!("Returning cached jobs");
            response.cached = true;
            response.cache_age = Some(format!("{} seconds", age.as_secs()));
        }
        Freshness::Fresh { captured_at } => {
            response.timestamp = Some(captured_at.to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        Freshness::Stale { age, reason } => {
            info!(
                "Returning stale jobs cached {} seconds ago after: {}",
                age.as_secs(),
                reason
            );
            response.cached = true;
            response.stale = Some(true);
            response.error = Some(STALE_NOTE.to_string());
        }
    }

    Ok(Json(response))
}

fn filter_from_query(query: &JobQuery) -> JobFilter {
    JobFilter {
        keyword: query.q.clone(),
        location: query.location.clone(),
        remote_only: query.remote.unwrap_or(false),
        full_time_only: query.fulltime.unwrap_or(false),
        contract_only: query.contract.unwrap_or(false),
    }
}
