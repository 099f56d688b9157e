// src/cli.rs
use crate::cache::JobCache;
use crate::ceipal::{CeipalClient, JobSource};
use crate::environment::AppConfig;
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "ceipal-jobs")]
#[command(about = "Serve Ceipal job listings to the careers page")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Overrides PORT and config.yaml
        #[arg(long)]
        port: Option<u16>,
    },
    /// Sign in, fetch the postings once and print the normalized jobs as JSON
    Fetch {
        #[arg(long)]
        pretty: bool,
    },
}

pub async fn handle_command(cli: Cli, config: AppConfig) -> Result<()> {
    let client = CeipalClient::new(config.portal.clone())?;

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            let cache = JobCache::new(Arc::new(client), config.cache_ttl);
            start_web_server(cache, port.unwrap_or(config.port)).await
        }
        Command::Fetch { pretty } => {
            let jobs = client
                .fetch_jobs()
                .await
                .context("Failed to fetch jobs from Ceipal")?
                .jobs;

            info!("Fetched {} jobs", jobs.len());

            let output = if pretty {
                serde_json::to_string_pretty(&jobs)?
            } else {
                serde_json::to_string(&jobs)?
            };
            println!("{}", output);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::try_parse_from(["ceipal-jobs"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["ceipal-jobs", "serve", "--port", "8080"]).unwrap();
        assert_eq!(cli.command, Some(Command::Serve { port: Some(8080) }));

        let cli = Cli::try_parse_from(["ceipal-jobs", "fetch", "--pretty"]).unwrap();
        assert_eq!(cli.command, Some(Command::Fetch { pretty: true }));

        assert!(Cli::try_parse_from(["ceipal-jobs", "serve", "--port", "http"]).is_err());
    }
}
