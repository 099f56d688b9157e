// src/environment.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://talenthirecls2.ceipal.com";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 15 * 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_COMPANY: &str = "Meta Force IT";

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub base_url: String,
    pub credentials: Credentials,
    pub request_timeout: Duration,
    pub default_company: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub portal: PortalConfig,
    pub cache_ttl: Duration,
    pub port: u16,
}

/// One environment section of `config.yaml`. Anything left out falls back to
/// environment variables, then to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSection {
    pub base_url: Option<String>,
    pub cache_ttl_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub port: Option<u16>,
    pub default_company: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSection,
    #[serde(default)]
    production: FileSection,
}

impl AppConfig {
    /// Load configuration from `.env`, the optional `config.yaml` and the process environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let section = Self::load_file_section(Path::new("config.yaml"), &environment)?;
        Self::from_sources(environment, section, |key| std::env::var(key).ok())
    }

    fn get_environment() -> String {
        std::env::var("CEIPAL_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_file_section(path: &Path, environment: &str) -> Result<FileSection> {
        if !path.exists() {
            return Ok(FileSection::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_file_section(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse_file_section(content: &str, environment: &str) -> Result<FileSection> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    /// Build the configuration from a file section and an environment lookup.
    /// Environment values win over file values.
    pub fn from_sources<F>(environment: String, section: FileSection, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials {
            username: required(&lookup, "CEIPAL_USERNAME")?,
            password: required(&lookup, "CEIPAL_PASSWORD")?,
        };

        let base_url = lookup("CEIPAL_BASE_URL")
            .or(section.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let cache_ttl_secs = match lookup("CACHE_TTL_SECS") {
            Some(raw) => parse_number(&raw, "CACHE_TTL_SECS")?,
            None => section.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS),
        };

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_number(&raw, "REQUEST_TIMEOUT_SECS")?,
            None => section
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number"))?,
            None => section.port.unwrap_or(DEFAULT_PORT),
        };

        let default_company = lookup("DEFAULT_COMPANY")
            .or(section.default_company)
            .unwrap_or_else(|| DEFAULT_COMPANY.to_string());

        Ok(Self {
            environment,
            portal: PortalConfig {
                base_url,
                credentials,
                request_timeout: Duration::from_secs(request_timeout_secs),
                default_company,
            },
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            port,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("{} environment variable not set", key))
}

fn parse_number(raw: &str, key: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("{} must be a whole number of seconds", key))
}
