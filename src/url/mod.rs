//! URL handling module
//!
//! This module provides host extraction, path extraction for
//! categorization, and report filename generation.

mod domain;

use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use url::Url;

// Re-export main functions
pub use domain::extract_domain;

/// Returns the path component of a URL, or `None` when it does not parse
///
/// # Examples
///
/// ```
/// use sitemap_audit::url::url_path;
///
/// assert_eq!(url_path("https://example.com/blog/post?x=1"), Some("/blog/post".to_string()));
/// assert_eq!(url_path("not a url"), None);
/// ```
pub fn url_path(url: &str) -> Option<String> {
    Url::parse(url.trim()).ok().map(|parsed| parsed.path().to_string())
}

/// Builds the download filename for a report
///
/// Format: `{host}_advanced_seo_analysis_{YYYYMMDD_HHMMSS}.{ext}`, where dots
/// and the port colon of the host become underscores so the name is valid on
/// every filesystem. An unparseable sitemap URL yields `unknown` as host part.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sitemap_audit::url::report_filename;
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
/// assert_eq!(
///     report_filename("https://www.example.com/sitemap.xml", &at, "xlsx"),
///     "www_example_com_advanced_seo_analysis_20240309_140507.xlsx"
/// );
/// ```
pub fn report_filename<Tz>(sitemap_url: &str, at: &DateTime<Tz>, extension: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let domain = Url::parse(sitemap_url.trim())
        .ok()
        .and_then(|url| extract_domain(&url))
        .unwrap_or_else(|| "unknown".to_string());

    let host: String = domain
        .chars()
        .filter(|c| !matches!(c, '[' | ']'))
        .map(|c| if matches!(c, '.' | ':') { '_' } else { c })
        .collect();

    format!(
        "{}_advanced_seo_analysis_{}.{}",
        host,
        at.format("%Y%m%d_%H%M%S"),
        extension
    )
}
