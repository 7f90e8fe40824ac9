//! Markdown summary generation
//!
//! This module generates human-readable markdown summaries of audit results,
//! including issue counters and category sizes.

use crate::output::stats::{LONG_TITLE_CHARS, SHORT_DESCRIPTION_CHARS};
use crate::output::traits::{AuditSummary, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary of an audit to `output_path`
///
/// # Arguments
///
/// * `summary` - The audit summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn write_markdown_summary(summary: &AuditSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats an audit summary as markdown
pub fn format_markdown_summary(summary: &AuditSummary) -> String {
    let stats = &summary.stats;
    let mut md = String::new();

    md.push_str("# Sitemap SEO Audit Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Sitemap**: {}\n", summary.sitemap_url));
    md.push_str(&format!("- **Generated**: {}\n", summary.generated_at));
    md.push_str(&format!(
        "- **Duration**: {:.1} seconds\n",
        summary.duration_seconds
    ));
    md.push_str(&format!("- **Report**: {}\n\n", summary.report_filename));

    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Total URLs**: {}\n", summary.total_urls));
    md.push_str(&format!("- **Processed**: {}\n", stats.processed));
    md.push_str(&format!("- **Healthy**: {}\n", stats.healthy));
    md.push_str(&format!("- **Warnings**: {}\n", stats.warnings));
    md.push_str(&format!("- **Errors**: {}\n", stats.errors));
    md.push_str(&format!(
        "- **Healthy Rate**: {:.2}%\n",
        summary.healthy_rate()
    ));
    md.push_str(&format!("- **Error Rate**: {:.2}%\n\n", summary.error_rate()));

    if !summary.category_counts.is_empty() {
        md.push_str("## Categories\n\n");
        md.push_str("| Category | Pages |\n");
        md.push_str("|----------|-------|\n");
        for (name, count) in &summary.category_counts {
            md.push_str(&format!("| {} | {} |\n", name, count));
        }
        md.push('\n');
    }

    md.push_str("## Issues\n\n");
    md.push_str("| Issue | Pages |\n");
    md.push_str("|-------|-------|\n");
    md.push_str(&format!("| Duplicate titles | {} |\n", stats.duplicate_titles));
    md.push_str(&format!("| Missing titles | {} |\n", stats.missing_titles));
    md.push_str(&format!(
        "| Long titles (> {} chars) | {} |\n",
        LONG_TITLE_CHARS, stats.long_titles
    ));
    md.push_str(&format!(
        "| Empty descriptions | {} |\n",
        stats.empty_descriptions
    ));
    md.push_str(&format!(
        "| Short descriptions (< {} chars) | {} |\n",
        SHORT_DESCRIPTION_CHARS, stats.short_descriptions
    ));
    md.push_str(&format!("| Duplicate H1s | {} |\n", stats.duplicate_h1s));
    md.push_str(&format!("| Noindex | {} |\n", stats.noindex));
    md.push_str(&format!("| Fetch errors | {} |\n", stats.errors));

    md
}
