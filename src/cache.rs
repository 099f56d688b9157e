// src/cache.rs
//! Single-entry TTL cache in front of a `JobSource`

use crate::ceipal::JobSource;
use crate::error::CeipalError;
use crate::types::JobRecord;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{error, info, warn};

pub const STALE_NOTE: &str = "Using stale cache due to fetch error";

struct CacheEntry {
    jobs: Arc<Vec<JobRecord>>,
    fetched_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// Served from cache within the TTL
    Cached { age: Duration },
    /// Fetched from the portal by this call
    Fresh { captured_at: DateTime<Utc> },
    /// Refresh failed, previous data served
    Stale { age: Duration, reason: String },
}

#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub jobs: Arc<Vec<JobRecord>>,
    pub freshness: Freshness,
}

pub struct JobCache {
    source: Arc<dyn JobSource>,
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
    // Held for the whole upstream call so concurrent misses share one refresh.
    // Guards the failure reason of the last completed refresh.
    refresh_lock: Mutex<Option<String>>,
    // Completed refreshes, successful or not
    refreshes: AtomicU64,
}

impl JobCache {
    pub fn new(source: Arc<dyn JobSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entry: RwLock::new(None),
            refresh_lock: Mutex::new(None),
            refreshes: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return cached jobs while younger than the TTL, refreshing otherwise.
    ///
    /// A failed refresh falls back to the previous entry; the error only reaches
    /// the caller when nothing was ever cached. Callers that queued behind a
    /// refresh take its outcome instead of calling the portal again.
    pub async fn get(&self) -> Result<CacheLookup, CeipalError> {
        if let Some(hit) = self.lookup_fresh().await {
            return Ok(hit);
        }

        let seen = self.refreshes.load(Ordering::Acquire);
        let mut last_failure = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited
        if let Some(hit) = self.lookup_fresh().await {
            return Ok(hit);
        }
        if self.refreshes.load(Ordering::Acquire) != seen {
            if let Some(reason) = last_failure.clone() {
                if let Some(stale) = self.lookup_stale(reason).await {
                    return Ok(stale);
                }
            }
        }

        info!("Job cache expired or empty, fetching from Ceipal");

        let outcome = match self.source.fetch_jobs().await {
            Ok(batch) => {
                let jobs = Arc::new(batch.jobs);
                *self.entry.write().await = Some(CacheEntry {
                    jobs: Arc::clone(&jobs),
                    fetched_at: Instant::now(),
                });
                *last_failure = None;

                Ok(CacheLookup {
                    jobs,
                    freshness: Freshness::Fresh {
                        captured_at: batch.captured_at,
                    },
                })
            }
            Err(e) => {
                *last_failure = Some(e.to_string());
                match self.lookup_stale(e.to_string()).await {
                    Some(stale) => {
                        warn!("Job refresh failed, serving stale cache: {}", e);
                        Ok(stale)
                    }
                    None => {
                        error!("Job refresh failed with no cached data: {}", e);
                        Err(e)
                    }
                }
            }
        };

        self.refreshes.fetch_add(1, Ordering::Release);
        outcome
    }

    async fn lookup_fresh(&self) -> Option<CacheLookup> {
        let entry = self.entry.read().await;
        let entry = entry.as_ref()?;
        let age = entry.fetched_at.elapsed();

        (age < self.ttl).then(|| CacheLookup {
            jobs: Arc::clone(&entry.jobs),
            freshness: Freshness::Cached { age },
        })
    }

    async fn lookup_stale(&self, reason: String) -> Option<CacheLookup> {
        let entry = self.entry.read().await;
        let entry = entry.as_ref()?;

        Some(CacheLookup {
            jobs: Arc::clone(&entry.jobs),
            freshness: Freshness::Stale {
                age: entry.fetched_at.elapsed(),
                reason,
            },
        })
    }
}
