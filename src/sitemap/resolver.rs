//! Sitemap hierarchy resolution
//!
//! Walks a sitemap index tree breadth-first and unions the page locations of
//! every reachable urlset. A node that fails to fetch or parse contributes
//! nothing; its siblings and parents are unaffected.

use crate::config::CrawlerConfig;
use crate::crawler::fetch_once;
use crate::sitemap::parser::{parse_sitemap, SitemapDocument};
use crate::sitemap::SitemapError;
use reqwest::Client;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::time::Duration;

/// Resolves a sitemap URL into the set of page URLs it lists
#[derive(Debug, Clone)]
pub struct SitemapResolver {
    client: Client,
    timeout: Duration,
    max_redirects: u32,
    max_depth: u32,
}

impl SitemapResolver {
    pub fn new(client: Client, config: &CrawlerConfig) -> Self {
        Self {
            client,
            timeout: Duration::from_millis(config.request_timeout_ms),
            max_redirects: config.max_redirects,
            max_depth: config.max_sitemap_depth.max(1),
        }
    }

    /// Returns every page URL reachable from `sitemap_url`, deduplicated
    ///
    /// Index documents are followed up to `max-sitemap-depth` levels (the
    /// root counts as the first) and a sitemap is never fetched twice, so
    /// cyclic indexes terminate. Failures are logged, never raised.
    pub async fn resolve(&self, sitemap_url: &str) -> BTreeSet<String> {
        let mut pages = BTreeSet::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([(sitemap_url.trim().to_string(), 1u32)]);

        while let Some((url, level)) = queue.pop_front() {
            if !visited.insert(url.clone()) {
                tracing::debug!("Sitemap {} already resolved, skipping", url);
                continue;
            }

            let document = match self.fetch_document(&url).await {
                Ok(document) => document,
                Err(e) => {
                    tracing::warn!("Sitemap error for {}: {}", url, e);
                    continue;
                }
            };

            match document {
                SitemapDocument::UrlSet(locations) => {
                    tracing::debug!("Sitemap {} lists {} pages", url, locations.len());
                    pages.extend(locations);
                }
                SitemapDocument::Index(children) => {
                    tracing::debug!("Sitemap index {} lists {} sitemaps", url, children.len());
                    if level >= self.max_depth {
                        tracing::warn!(
                            "Sitemap index {} exceeds nesting depth {}, skipping {} children",
                            url,
                            self.max_depth,
                            children.len()
                        );
                        continue;
                    }
                    queue.extend(children.into_iter().map(|child| (child, level + 1)));
                }
            }
        }

        tracing::info!(
            "Resolved {} unique URLs from {} sitemaps",
            pages.len(),
            visited.len()
        );

        pages
    }

    /// Fetches and parses one sitemap document
    async fn fetch_document(&self, url: &str) -> Result<SitemapDocument, SitemapError> {
        let outcome = fetch_once(&self.client, url, self.timeout, self.max_redirects).await?;

        match outcome.status.code() {
            Some(code) if (200..300).contains(&code) => parse_sitemap(&outcome.body),
            Some(code) => Err(SitemapError::Status(code)),
            None => Err(SitemapError::Status(0)),
        }
    }
}
