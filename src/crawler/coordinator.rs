//! Crawler coordinator - bounded worker pool over the resolved URL set
//!
//! This module runs the fetch+extract pipeline for every URL:
//! - One task per URL, at most `max-workers` running at once
//! - Tasks share only the HTTP client and the fetch policy
//! - Records are collected in completion order into a single list
//!
//! The caller is blocked until every submitted task has completed; there is
//! no cancellation once URLs are submitted.

use crate::config::CrawlerConfig;
use crate::crawler::extractor::extract_metadata;
use crate::crawler::fetcher::{fetch_page, FetchPolicy};
use crate::record::{PageMetadata, PageRecord};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Runs the audit pipeline over a set of page URLs
#[derive(Debug, Clone)]
pub struct Coordinator {
    client: Client,
    policy: FetchPolicy,
    max_workers: usize,
}

impl Coordinator {
    /// Creates a coordinator sharing `client` across all workers
    pub fn new(client: Client, config: &CrawlerConfig) -> Self {
        Self {
            client,
            policy: FetchPolicy::from(config),
            max_workers: config.max_workers.max(1) as usize,
        }
    }

    /// Overrides the fetch policy
    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Audits every URL and returns one record per distinct URL
    ///
    /// Records are ordered by completion time, not by submission order.
    pub async fn run<I>(&self, urls: I) -> Vec<PageRecord>
    where
        I: IntoIterator<Item = String>,
    {
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut tasks = JoinSet::new();
        let mut outstanding = HashSet::new();

        for url in urls {
            if !outstanding.insert(url.clone()) {
                continue;
            }

            let semaphore = Arc::clone(&semaphore);
            let client = self.client.clone();
            let policy = self.policy.clone();

            tasks.spawn(async move {
                // A closed semaphore only lifts the bound, so the error is ignored
                let _permit = semaphore.acquire_owned().await.ok();
                audit_page(&client, &url, &policy).await
            });
        }

        let total = outstanding.len();
        tracing::info!(
            "Auditing {} URLs with {} workers",
            total,
            self.max_workers
        );

        let start_time = std::time::Instant::now();
        let mut records = Vec::with_capacity(total);

        let mut progress = ProgressMarker::new(PROGRESS_EVERY);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(record) => {
                    outstanding.remove(&record.original_url);
                    records.push(record);

                    if progress.reached(records.len()) {
                        let elapsed = start_time.elapsed();
                        let rate =
                            records.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
                        tracing::info!(
                            "Progress: {}/{} pages audited, {:.2} pages/sec",
                            records.len(),
                            total,
                            rate
                        );
                    }
                }
                Err(e) => {
                    tracing::error!("Audit task failed: {}", e);
                }
            }
        }

        // A task that died without reporting still owes its URL a record
        for url in outstanding {
            tracing::warn!("No result for {}, recording it as failed", url);
            records.push(PageRecord::failed(&url));
        }

        tracing::info!(
            "Audited {} pages in {:?}",
            records.len(),
            start_time.elapsed()
        );

        records
    }
}

/// Completed pages between two progress lines
const PROGRESS_EVERY: usize = 10;

/// Reports each multiple of `every` at most once
#[derive(Debug)]
struct ProgressMarker {
    every: usize,
    last: usize,
}

impl ProgressMarker {
    fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
            last: 0,
        }
    }

    fn reached(&mut self, completed: usize) -> bool {
        if completed == 0 || completed % self.every != 0 || completed <= self.last {
            return false;
        }
        self.last = completed;
        true
    }
}

/// Fetches one page and extracts its metadata
///
/// Fetch happens-before extraction happens-before the record is emitted.
pub async fn audit_page(client: &Client, url: &str, policy: &FetchPolicy) -> PageRecord {
    let outcome = fetch_page(client, url, policy).await;

    if outcome.status.is_error() {
        return PageRecord::failed(url);
    }

    let metadata = match extract_metadata(&outcome.body) {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::warn!("Failed to extract metadata for {}: {}", url, e);
            PageMetadata::extraction_error()
        }
    };

    PageRecord {
        original_url: url.to_string(),
        final_url: outcome.final_url,
        status: outcome.status,
        redirect_count: outcome.redirect_count,
        metadata,
    }
}
