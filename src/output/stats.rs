//! Aggregate statistics over page records
//!
//! This module computes the issue counters reported after an audit and
//! prints them for the command line.

use crate::record::{NoindexStatus, PageRecord};
use serde::Serialize;

/// Titles longer than this many characters count as long
pub const LONG_TITLE_CHARS: usize = 60;

/// Non-empty descriptions shorter than this many characters count as short
pub const SHORT_DESCRIPTION_CHARS: usize = 120;

/// Issue counters over one audit run
///
/// Counters are additive: a record contributing to two counters contributes
/// to both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStats {
    pub duplicate_titles: usize,
    pub missing_titles: usize,
    pub empty_descriptions: usize,
    pub duplicate_h1s: usize,
    pub noindex: usize,
    pub long_titles: usize,
    pub short_descriptions: usize,
    pub errors: usize,

    /// Total records
    pub processed: usize,
    pub warnings: usize,
    pub healthy: usize,
}

/// Computes the statistics over a flat record list
pub fn summarize(records: &[PageRecord]) -> AuditStats {
    let mut stats = AuditStats {
        processed: records.len(),
        ..AuditStats::default()
    };

    for record in records {
        let meta = &record.metadata;

        if meta.title.is_duplicate() {
            stats.duplicate_titles += 1;
        }
        if meta.title.is_empty() {
            stats.missing_titles += 1;
        }
        if meta.description.is_empty() {
            stats.empty_descriptions += 1;
        }
        if meta.h1.is_duplicate() {
            stats.duplicate_h1s += 1;
        }
        if meta.robots.status() == NoindexStatus::Yes {
            stats.noindex += 1;
        }
        if record.rendered_title().chars().count() > LONG_TITLE_CHARS {
            stats.long_titles += 1;
        }
        let description_chars = record.rendered_description().chars().count();
        if description_chars > 0 && description_chars < SHORT_DESCRIPTION_CHARS {
            stats.short_descriptions += 1;
        }
        if record.status.is_error() {
            stats.errors += 1;
        }
    }

    stats.warnings = stats.duplicate_titles
        + stats.duplicate_h1s
        + stats.long_titles
        + stats.short_descriptions;
    stats.healthy = stats
        .processed
        .saturating_sub(stats.errors + stats.duplicate_titles + stats.duplicate_h1s);

    tracing::debug!(
        "Summarized {} records: {} errors, {} warnings",
        stats.processed,
        stats.errors,
        stats.warnings
    );

    stats
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
/// * `category_counts` - Non-empty categories in presentation order
pub fn print_statistics(stats: &AuditStats, category_counts: &[(String, usize)]) {
    println!("=== Audit Statistics ===\n");

    println!("Overview:");
    println!("  Pages processed: {}", stats.processed);
    println!("  Healthy: {}", stats.healthy);
    println!("  Warnings: {}", stats.warnings);
    println!("  Errors: {}", stats.errors);
    println!();

    if !category_counts.is_empty() {
        println!("Pages by Category:");
        for (name, count) in category_counts {
            let percentage = if stats.processed > 0 {
                (*count as f64 / stats.processed as f64) * 100.0
            } else {
                0.0
            };
            println!("  {}: {} ({:.1}%)", name, count, percentage);
        }
        println!();
    }

    println!("Issues:");
    println!("  Duplicate titles: {}", stats.duplicate_titles);
    println!("  Missing titles: {}", stats.missing_titles);
    println!("  Long titles (> {} chars): {}", LONG_TITLE_CHARS, stats.long_titles);
    println!("  Empty descriptions: {}", stats.empty_descriptions);
    println!(
        "  Short descriptions (< {} chars): {}",
        SHORT_DESCRIPTION_CHARS, stats.short_descriptions
    );
    println!("  Duplicate H1s: {}", stats.duplicate_h1s);
    println!("  Noindex pages: {}", stats.noindex);
}
