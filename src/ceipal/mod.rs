// src/ceipal/mod.rs
//! Ceipal portal integration: session, listing fetch, parsing and normalization

pub mod client;
pub mod fetcher;
pub mod normalizer;
pub mod parser;
pub mod session;

pub use client::{CeipalClient, JobBatch, JobSource};
pub use parser::ParseOutcome;
