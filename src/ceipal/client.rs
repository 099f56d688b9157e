// src/ceipal/client.rs
use super::fetcher::fetch_listings;
use super::normalizer::normalize_job;
use super::parser::parse_listing;
use super::session::acquire_session;
use crate::environment::PortalConfig;
use crate::error::CeipalError;
use crate::types::JobRecord;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::info;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Jobs from one portal cycle, with the instant used for their default dates
#[derive(Debug, Clone)]
pub struct JobBatch {
    pub jobs: Vec<JobRecord>,
    pub captured_at: DateTime<Utc>,
}

/// Anything able to produce the current normalized job list
#[rocket::async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_jobs(&self) -> Result<JobBatch, CeipalError>;
}

/// Runs one full portal cycle: sign in, fetch the postings page, parse, normalize.
/// Every cycle signs in again; sessions are never reused.
pub struct CeipalClient {
    client: Client,
    login_client: Client,
    config: PortalConfig,
}

impl CeipalClient {
    pub fn new(config: PortalConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let login_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .redirect(Policy::none())
            .build()
            .context("Failed to create login HTTP client")?;

        Ok(Self {
            client,
            login_client,
            config,
        })
    }
}

#[rocket::async_trait]
impl JobSource for CeipalClient {
    async fn fetch_jobs(&self) -> Result<JobBatch, CeipalError> {
        let session = acquire_session(
            &self.login_client,
            &self.config.base_url,
            &self.config.credentials,
        )
        .await?;

        let payload = fetch_listings(&self.client, &self.config.base_url, &session).await?;
        let captured_at = Utc::now();

        let jobs: Vec<JobRecord> = parse_listing(&payload)
            .into_records()
            .iter()
            .map(|raw| normalize_job(raw, captured_at, &self.config.default_company))
            .collect();

        info!("Fetched {} jobs from Ceipal", jobs.len());
        Ok(JobBatch { jobs, captured_at })
    }
}
