//! HTML metadata extraction
//!
//! This module parses fetched pages and collects the on-page SEO signals:
//! - `<title>` elements in the document head
//! - `<meta name="description">` content
//! - `<h1>` headings anywhere in the document
//! - `<link rel="canonical">` targets
//! - `<meta name="robots">` directives
//!
//! Every occurrence is kept in document order so duplicates can be reported.

use crate::record::{MetaField, PageMetadata, RobotsField};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Errors that prevent metadata extraction for a page
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("response body is binary, not HTML text")]
    BinaryContent,

    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Extracts SEO metadata from a raw response body
///
/// # Arguments
///
/// * `body` - The raw response body
///
/// # Returns
///
/// * `Ok(PageMetadata)` - Every field extracted
/// * `Err(ExtractError)` - The page could not be parsed; callers record all
///   fields as extraction errors
///
/// # Example
///
/// ```
/// use sitemap_audit::crawler::extract_metadata;
///
/// let html = br#"<html><head><title>Test</title></head><body><h1>Hi</h1></body></html>"#;
/// let metadata = extract_metadata(html).unwrap();
/// assert_eq!(metadata.title.value(), Some("Test"));
/// assert_eq!(metadata.h1.value(), Some("Hi"));
/// ```
pub fn extract_metadata(body: &[u8]) -> Result<PageMetadata, ExtractError> {
    // NUL never appears in text markup, only in binary payloads
    if body.contains(&0) {
        return Err(ExtractError::BinaryContent);
    }

    let html = String::from_utf8_lossy(body);
    parse_metadata(&html)
}

/// Extracts SEO metadata from an HTML string
pub fn parse_metadata(html: &str) -> Result<PageMetadata, ExtractError> {
    let document = Html::parse_document(html);

    let title = MetaField::from_values(
        select(&document, "head title")?
            .map(|element| element_text(&element))
            .collect(),
    );

    let description = MetaField::from_values(
        meta_contents(&document, "description")?
            .into_iter()
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .collect(),
    );

    let h1 = MetaField::from_values(
        select(&document, "h1")?
            .map(|element| element_text(&element))
            .collect(),
    );

    let canonical = MetaField::from_values(extract_canonicals(&document)?);

    let robots = extract_robots(&document)?;

    Ok(PageMetadata {
        title,
        description,
        h1,
        canonical,
        robots,
    })
}

/// Runs a CSS selector over the document
fn select<'a>(
    document: &'a Html,
    selector: &str,
) -> Result<impl Iterator<Item = ElementRef<'a>> + 'a, ExtractError> {
    let parsed = Selector::parse(selector).map_err(|e| ExtractError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })?;

    Ok(document.select(&parsed).collect::<Vec<_>>().into_iter())
}

/// Collects the trimmed text content of an element
fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Returns the `content` of every `<meta>` whose name matches, ignoring case
fn meta_contents(document: &Html, name: &str) -> Result<Vec<String>, ExtractError> {
    Ok(select(document, "meta[name]")?
        .filter(|element| {
            element
                .value()
                .attr("name")
                .is_some_and(|value| value.trim().eq_ignore_ascii_case(name))
        })
        .map(|element| element.value().attr("content").unwrap_or("").to_string())
        .collect())
}

/// Collects canonical link targets; blank hrefs are not counted
fn extract_canonicals(document: &Html) -> Result<Vec<String>, ExtractError> {
    Ok(select(document, "link[rel]")?
        .filter(|element| {
            element.value().attr("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("canonical"))
            })
        })
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .collect())
}

/// Derives the noindex status from every robots meta tag
fn extract_robots(document: &Html) -> Result<RobotsField, ExtractError> {
    let contents = meta_contents(document, "robots")?;
    let noindex = contents
        .iter()
        .any(|content| content.to_lowercase().contains("noindex"));

    Ok(RobotsField::Directives {
        noindex,
        tag_count: contents.len(),
    })
}
