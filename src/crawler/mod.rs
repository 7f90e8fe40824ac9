//! Crawler module for page fetching and processing
//!
//! This module contains the per-page audit pipeline, including:
//! - HTTP fetching with retry logic and redirect counting
//! - HTML metadata extraction
//! - The bounded worker pool that runs both over a URL set

mod coordinator;
mod extractor;
mod fetcher;

pub use coordinator::{audit_page, Coordinator};
pub use extractor::{extract_metadata, parse_metadata, ExtractError};
pub use fetcher::{
    build_http_client, fetch_once, fetch_page, user_agent_string, FetchError, FetchOutcome, FetchPolicy,
};
