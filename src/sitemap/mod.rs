//! Sitemap handling module
//!
//! This module fetches XML sitemaps, tells sitemap indexes from urlsets and
//! resolves the whole hierarchy into a deduplicated set of page URLs.

mod parser;
mod resolver;

pub use parser::{parse_sitemap, SitemapDocument};
pub use resolver::SitemapResolver;

use crate::crawler::FetchError;
use thiserror::Error;

/// Errors raised while resolving a single sitemap node
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("request failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("root element <{0}> is neither <urlset> nor <sitemapindex>")]
    UnknownRoot(String),
}
