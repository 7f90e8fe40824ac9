//! Sitemap XML parsing
//!
//! Element names are matched on their local part, so namespaced and
//! unprefixed sitemaps parse alike.

use crate::sitemap::SitemapError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// `<sitemapindex>`: locations of child sitemaps
    Index(Vec<String>),
    /// `<urlset>`: page locations
    UrlSet(Vec<String>),
}

impl SitemapDocument {
    pub fn locations(&self) -> &[String] {
        match self {
            Self::Index(locs) | Self::UrlSet(locs) => locs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    Index,
    UrlSet,
}

/// Parses a sitemap or sitemap index
///
/// Only `<loc>` values that are direct children of `<sitemap>` (index) or
/// `<url>` (urlset) entries are collected, so extension tags such as
/// `<image:loc>` are skipped. Values are trimmed and non-HTTP(S) locations are
/// dropped. Duplicates are kept; the resolver deduplicates across documents.
pub fn parse_sitemap(xml: &[u8]) -> Result<SitemapDocument, SitemapError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut root = None;
    // Number of currently open elements
    let mut depth = 0usize;
    let mut in_entry = false;
    let mut in_loc = false;
    let mut loc = String::new();
    let mut locations = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                match (root, depth, name.as_ref()) {
                    (None, _, b"sitemapindex") => root = Some(Root::Index),
                    (None, _, b"urlset") => root = Some(Root::UrlSet),
                    (None, _, other) => {
                        return Err(SitemapError::UnknownRoot(
                            String::from_utf8_lossy(other).to_string(),
                        ))
                    }
                    (Some(Root::Index), 1, b"sitemap") | (Some(Root::UrlSet), 1, b"url") => {
                        in_entry = true;
                    }
                    (Some(_), 2, b"loc") if in_entry => {
                        in_loc = true;
                        loc.clear();
                    }
                    _ => {}
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => {
                let name = e.local_name();
                match (root, name.as_ref()) {
                    (None, b"sitemapindex") => return Ok(SitemapDocument::Index(Vec::new())),
                    (None, b"urlset") => return Ok(SitemapDocument::UrlSet(Vec::new())),
                    (None, other) => {
                        return Err(SitemapError::UnknownRoot(
                            String::from_utf8_lossy(other).to_string(),
                        ))
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                if in_loc {
                    let text = e
                        .unescape()
                        .map_err(|e| SitemapError::Xml(e.to_string()))?;
                    loc.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if in_loc {
                    loc.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(e)) => {
                depth = depth.saturating_sub(1);
                let name = e.local_name();
                match (depth, name.as_ref()) {
                    (2, b"loc") if in_loc => {
                        in_loc = false;
                        let value = loc.trim();
                        if is_http_url(value) {
                            locations.push(value.to_string());
                        }
                    }
                    (1, _) => in_entry = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SitemapError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    match root {
        Some(Root::Index) => Ok(SitemapDocument::Index(locations)),
        Some(Root::UrlSet) => Ok(SitemapDocument::UrlSet(locations)),
        None => Err(SitemapError::Xml("document has no root element".to_string())),
    }
}

fn is_http_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
