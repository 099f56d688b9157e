// src/ceipal/session.rs
use crate::environment::Credentials;
use crate::error::CeipalError;
use reqwest::header::{HeaderMap, ACCEPT, SET_COOKIE};
use reqwest::Client;
use tracing::{debug, info};

const SIGNIN_ENDPOINT: &str = "/signin/";

/// Cookie string proving an authenticated portal session. Valid for one fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sign in to the portal and return the session cookies.
///
/// `client` must not follow redirects: the portal answers a successful login
/// with a 302 whose `Set-Cookie` headers carry the session.
pub async fn acquire_session(
    client: &Client,
    base_url: &str,
    credentials: &Credentials,
) -> Result<SessionToken, CeipalError> {
    let url = format!("{}{}", base_url, SIGNIN_ENDPOINT);
    info!("Signing in to Ceipal as {}", credentials.username);

    let form = [
        ("username", credentials.username.as_str()),
        ("password", credentials.password.as_str()),
        ("rememberMe", "false"),
    ];

    let response = client
        .post(&url)
        .header(
            ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .form(&form)
        .send()
        .await?;

    debug!("Login response status: {}", response.status());

    let token = session_cookies(response.headers()).ok_or_else(|| {
        CeipalError::Authentication("no session cookies obtained".to_string())
    })?;

    info!("Ceipal session established");
    Ok(token)
}

/// Join the `name=value` part of every `Set-Cookie` header, dropping cookie attributes
pub(crate) fn session_cookies(headers: &HeaderMap) -> Option<SessionToken> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(SessionToken(pairs.join("; ")))
    }
}
