pub mod cache;
pub mod ceipal;
pub mod cli;
pub mod environment;
pub mod error;
pub mod search;
pub mod types;
pub mod web;

pub use cache::JobCache;
pub use ceipal::{CeipalClient, JobBatch, JobSource};
pub use environment::AppConfig;
pub use error::CeipalError;
pub use web::start_web_server;
