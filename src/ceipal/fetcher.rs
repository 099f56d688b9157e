// src/ceipal/fetcher.rs
use super::session::SessionToken;
use crate::error::CeipalError;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::Client;
use tracing::{debug, info, warn};

const JOB_POSTS_ENDPOINT: &str = "/JobPosts/index";

// The portal serves its sign-in page with a 200 when the session is invalid
const LOGIN_PAGE_MARKERS: [&str; 3] = ["Sign In", "signin", "login"];

#[derive(Debug, Clone)]
pub struct ListingPayload {
    pub body: String,
    pub content_type: Option<String>,
}

impl ListingPayload {
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }
}

pub async fn fetch_listings(
    client: &Client,
    base_url: &str,
    session: &SessionToken,
) -> Result<ListingPayload, CeipalError> {
    let url = format!("{}{}", base_url, JOB_POSTS_ENDPOINT);
    info!("Fetching job postings from {}", url);

    let response = client
        .get(&url)
        .header(COOKIE, session.as_str())
        .header(
            ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .await?;

    let status = response.status();
    debug!("Job postings response status: {}", status);

    if !status.is_success() {
        return Err(CeipalError::Fetch { status });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let body = response.text().await?;
    let payload = ListingPayload { body, content_type };

    debug!(
        "Received {} bytes, content type {:?}",
        payload.body.len(),
        payload.content_type
    );

    check_not_login_page(&payload)?;
    Ok(payload)
}

pub(crate) fn check_not_login_page(payload: &ListingPayload) -> Result<(), CeipalError> {
    if payload.is_json() {
        return Ok(());
    }

    if LOGIN_PAGE_MARKERS
        .iter()
        .any(|marker| payload.body.contains(marker))
    {
        warn!("Portal returned its sign-in page instead of job postings");
        return Err(CeipalError::Authentication(
            "redirected to login page".to_string(),
        ));
    }

    Ok(())
}
