//! Audit orchestration
//!
//! Ties the pipeline together: resolve the sitemap, audit every page,
//! categorize the records, build and render the report and compute the
//! aggregate statistics.

use crate::categorize::{categorize, category_counts, CategoryTable};
use crate::config::{validate, Config};
use crate::crawler::{build_http_client, Coordinator};
use crate::output::{
    build_report, summarize, AuditStats, AuditSummary, ReportWriter, XlsxReportWriter,
};
use crate::sitemap::SitemapResolver;
use crate::url::report_filename;
use crate::{AuditError, Result};
use chrono::{DateTime, Local};
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// Result of one audit run
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub sitemap_url: String,
    /// Number of pages audited
    pub total_urls: usize,
    pub elapsed: Duration,
    pub generated_at: DateTime<Local>,
    /// Download filename of the report
    pub filename: String,
    pub content_type: &'static str,
    pub report_bytes: Vec<u8>,
    /// Non-empty categories in presentation order
    pub category_counts: Vec<(String, usize)>,
    pub stats: AuditStats,
}

impl AuditOutcome {
    pub fn summary(&self) -> AuditSummary {
        AuditSummary {
            sitemap_url: self.sitemap_url.clone(),
            generated_at: self.generated_at.to_rfc3339(),
            report_filename: self.filename.clone(),
            duration_seconds: self.elapsed.as_secs_f64(),
            total_urls: self.total_urls,
            category_counts: self.category_counts.clone(),
            stats: self.stats,
        }
    }
}

/// Runs sitemap audits with one shared HTTP client
pub struct Auditor {
    config: Config,
    client: Client,
    table: CategoryTable,
    writer: Box<dyn ReportWriter>,
}

impl Auditor {
    /// Creates an auditor from a configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Auditor)` - Ready to run audits
    /// * `Err(AuditError)` - The configuration is invalid or the HTTP client
    ///   could not be built
    pub fn new(config: Config) -> Result<Self> {
        validate(&config)?;

        let client = build_http_client(&config)?;
        let table = CategoryTable::new(config.effective_categories());

        Ok(Self {
            config,
            client,
            table,
            writer: Box::new(XlsxReportWriter::new()),
        })
    }

    /// Replaces the report writer
    pub fn with_writer(mut self, writer: Box<dyn ReportWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.table
    }

    /// MIME type of the reports this auditor renders
    pub fn content_type(&self) -> &'static str {
        self.writer.content_type()
    }

    /// Audits every page listed by a sitemap
    ///
    /// Only a blank or malformed sitemap URL, or a sitemap tree that yields no
    /// page URL, fail the run. Per-page and per-sitemap failures are folded
    /// into the report.
    pub async fn analyze(&self, sitemap_url: &str) -> Result<AuditOutcome> {
        let sitemap_url = sitemap_url.trim();
        if sitemap_url.is_empty() {
            return Err(AuditError::InvalidInput(
                "Sitemap URL is required".to_string(),
            ));
        }
        if let Err(e) = Url::parse(sitemap_url) {
            return Err(AuditError::InvalidInput(format!(
                "Invalid sitemap URL {}: {}",
                sitemap_url, e
            )));
        }

        let start = Instant::now();
        tracing::info!("Starting audit of {}", sitemap_url);

        let resolver = SitemapResolver::new(self.client.clone(), &self.config.crawler);
        let urls = resolver.resolve(sitemap_url).await;
        if urls.is_empty() {
            return Err(AuditError::NoUrlsFound {
                sitemap_url: sitemap_url.to_string(),
            });
        }

        let discovered = urls.len();
        let limit = self.config.crawler.max_urls.unwrap_or(usize::MAX);
        if discovered > limit {
            tracing::info!(
                "Sitemap lists {} URLs, auditing the first {}",
                discovered,
                limit
            );
        }

        let coordinator = Coordinator::new(self.client.clone(), &self.config.crawler);
        let mut records = coordinator.run(urls.into_iter().take(limit)).await;

        if self.config.output.stable_order {
            records.sort_by(|a, b| a.original_url.cmp(&b.original_url));
        }

        let buckets = categorize(&self.table, &records);
        let counts = category_counts(&buckets);
        let report = build_report(&buckets);
        let report_bytes = self.writer.render(&report)?;
        let stats = summarize(&records);

        let generated_at = Local::now();
        let filename = report_filename(sitemap_url, &generated_at, self.writer.file_extension());
        let elapsed = start.elapsed();

        tracing::info!(
            "Audit of {} finished in {:.1}s: {} pages, {} errors, {} warnings",
            sitemap_url,
            elapsed.as_secs_f64(),
            stats.processed,
            stats.errors,
            stats.warnings
        );

        Ok(AuditOutcome {
            sitemap_url: sitemap_url.to_string(),
            total_urls: records.len(),
            elapsed,
            generated_at,
            filename,
            content_type: self.writer.content_type(),
            report_bytes,
            category_counts: counts,
            stats,
        })
    }
}
