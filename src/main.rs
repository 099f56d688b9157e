use anyhow::Result;
use ceipal_jobs::cli::{handle_command, Cli};
use ceipal_jobs::AppConfig;
use clap::Parser;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging first
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ceipal_jobs=info,rocket::server=off"));
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");

    if json_logs {
        Registry::default()
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .with(filter)
            .init();
    } else {
        Registry::default().with(fmt::layer()).with(filter).init();
    }

    let config = AppConfig::load()?;

    info!("Starting Ceipal jobs service");
    info!("Environment: {}", config.environment);
    info!("Portal: {}", config.portal.base_url);

    handle_command(cli, config).await
}
