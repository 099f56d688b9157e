// src/web/mod.rs

pub mod cors_utils;
pub mod handlers;
pub mod types;

pub use cors_utils::Cors;
pub use handlers::*;
pub use types::*;

use crate::cache::JobCache;
use anyhow::Result;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{catchers, get, routes, Build, Rocket, State};
use tracing::info;

#[get("/jobs?<query..>")]
pub async fn list_jobs(
    query: JobQuery,
    cache: &State<JobCache>,
) -> Result<Json<JobsResponse>, Custom<Json<ErrorResponse>>> {
    handlers::list_jobs_handler(query, cache.inner()).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

// Error catchers
#[rocket::catch(404)]
pub fn not_found() -> Json<NotFoundResponse> {
    handlers::not_found_handler()
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    handlers::internal_error_handler()
}

pub fn build_rocket(cache: JobCache, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", port));

    rocket::custom(figment)
        .attach(Cors)
        .manage(cache)
        .register("/", catchers![not_found, internal_error])
        .mount(
            "/api",
            routes![list_jobs, health, cors_utils::universal_options_handler],
        )
}

// Main server start function
pub async fn start_web_server(cache: JobCache, port: u16) -> Result<()> {
    info!(
        "Starting Ceipal jobs API on http://0.0.0.0:{} (cache TTL {}s)",
        port,
        cache.ttl().as_secs()
    );

    let _rocket = build_rocket(cache, port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket server failed: {}", e))?;

    Ok(())
}
